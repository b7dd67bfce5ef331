//! JSON shapes of the dashboard API.
//!
//! Field names are camelCase on the wire (`perPage`, `dateOfSale`,
//! `totalSaleAmount`, ...).

use serde::{Deserialize, Serialize};

/// Body of every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub mod seed {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InitResponse {
        pub message: String,
        /// Number of records now in the store.
        pub count: u64,
    }
}

pub mod month {
    use super::*;

    /// Query string of the month-scoped endpoints.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct MonthQuery {
        /// Month name, case-insensitive. Defaults to March.
        pub month: Option<String>,
    }
}

pub mod transaction {
    use chrono::{DateTime, Utc};

    use super::*;

    /// Query string of `GET /transactions`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionListQuery {
        pub month: Option<String>,
        pub search: Option<String>,
        pub page: Option<u64>,
        pub per_page: Option<u64>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: i64,
        pub title: String,
        pub description: String,
        pub price: f64,
        pub category: String,
        pub sold: bool,
        pub date_of_sale: DateTime<Utc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub image: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionListResponse {
        pub data: Vec<TransactionView>,
        /// Matches across all pages.
        pub total: u64,
        pub page: u64,
        pub per_page: u64,
    }
}

pub mod stats {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Statistics {
        pub total_sale_amount: f64,
        pub total_sold_items: u64,
        pub total_not_sold_items: u64,
    }

    /// Price range label (`"0-100"`, ..., `"901-above"`) to record count.
    ///
    /// The labels sort lexicographically in ascending price order.
    pub type BarChart = BTreeMap<String, u64>;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryCount {
        pub category: String,
        pub count: u64,
    }

    pub type PieChart = Vec<CategoryCount>;
}

pub mod dashboard {
    use super::*;
    use crate::{
        stats::{BarChart, PieChart, Statistics},
        transaction::TransactionListResponse,
    };

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Dashboard {
        pub transactions: TransactionListResponse,
        pub statistics: Statistics,
        pub bar_chart: BarChart,
        pub pie_chart: PieChart,
    }
}
