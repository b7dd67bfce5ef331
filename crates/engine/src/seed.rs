//! Seeding the record store from the upstream JSON dataset.

use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, Transaction};

/// Default location of the published dataset.
pub const DEFAULT_DATASET_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// One item of the upstream dataset, before normalisation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub sold: bool,
    #[serde(default)]
    pub image: Option<String>,
    pub date_of_sale: RawDate,
}

/// `dateOfSale` as found upstream: a date-like string or epoch milliseconds.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Millis(i64),
    Text(String),
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = EngineError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        let date_of_sale = normalize_date(&raw.date_of_sale)?;
        Ok(Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            price: raw.price,
            category: raw.category,
            sold: raw.sold,
            date_of_sale,
            image: raw.image,
        })
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Normalises a raw sale date to UTC.
///
/// Strings without an offset are taken as UTC; a bare date means midnight.
pub fn normalize_date(raw: &RawDate) -> ResultEngine<DateTime<Utc>> {
    match raw {
        RawDate::Millis(millis) => DateTime::from_timestamp_millis(*millis).ok_or_else(|| {
            EngineError::SeedFetch(format!("dateOfSale out of range: {millis}"))
        }),
        RawDate::Text(text) => parse_date_text(text.trim())
            .ok_or_else(|| EngineError::SeedFetch(format!("invalid dateOfSale: \"{text}\""))),
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Where seed data comes from.
#[async_trait]
pub trait DatasetSource: Debug + Send + Sync {
    async fn fetch(&self) -> ResultEngine<Vec<RawTransaction>>;
}

/// Fetches the dataset over HTTP.
#[derive(Clone, Debug)]
pub struct HttpDataset {
    client: reqwest::Client,
    url: String,
}

impl HttpDataset {
    pub fn new(url: impl Into<String>, timeout: Duration) -> ResultEngine<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DatasetSource for HttpDataset {
    async fn fetch(&self) -> ResultEngine<Vec<RawTransaction>> {
        tracing::info!("fetching seed dataset from {}", self.url);
        let items = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<RawTransaction>>()
            .await?;
        tracing::debug!("fetched {} raw transactions", items.len());
        Ok(items)
    }
}

/// A fixed, in-memory dataset.
#[derive(Clone, Debug, Default)]
pub struct StaticDataset {
    items: Vec<RawTransaction>,
}

impl StaticDataset {
    pub fn new(items: Vec<RawTransaction>) -> Self {
        Self { items }
    }

    /// Parses a JSON array in the upstream format.
    pub fn from_json(json: &str) -> ResultEngine<Self> {
        let items = serde_json::from_str(json)
            .map_err(|err| EngineError::SeedFetch(format!("malformed dataset: {err}")))?;
        Ok(Self { items })
    }
}

#[async_trait]
impl DatasetSource for StaticDataset {
    async fn fetch(&self) -> ResultEngine<Vec<RawTransaction>> {
        Ok(self.items.clone())
    }
}
