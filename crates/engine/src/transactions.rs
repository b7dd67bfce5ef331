//! Transaction records.
//!
//! A `Transaction` is one product sale as published by the upstream dataset.
//! The store keeps them in the `transactions` table together with a
//! surrogate `row_id` (insertion order) and derived columns: `sale_month`
//! and lowercase copies of the searchable text. SQLite's `LOWER()` only folds
//! ASCII, so the folding is done here.

use chrono::{DateTime, Datelike, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    /// Upstream identifier, not unique across reseeds.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub sold: bool,
    pub date_of_sale: DateTime<Utc>,
    pub image: Option<String>,
}

impl Transaction {
    /// Calendar month (1-12, UTC) the sale happened in.
    pub fn sale_month(&self) -> u32 {
        self.date_of_sale.month()
    }
}

/// Lowercase form used for case-insensitive search.
pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub row_id: i64,
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub sold: bool,
    pub image: Option<String>,
    pub date_of_sale: DateTimeUtc,
    pub sale_month: i32,
    pub title_folded: String,
    pub description_folded: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            row_id: ActiveValue::NotSet,
            id: ActiveValue::Set(tx.id),
            title: ActiveValue::Set(tx.title.clone()),
            description: ActiveValue::Set(tx.description.clone()),
            price: ActiveValue::Set(tx.price),
            category: ActiveValue::Set(tx.category.clone()),
            sold: ActiveValue::Set(tx.sold),
            image: ActiveValue::Set(tx.image.clone()),
            date_of_sale: ActiveValue::Set(tx.date_of_sale),
            sale_month: ActiveValue::Set(tx.sale_month() as i32),
            title_folded: ActiveValue::Set(fold_case(&tx.title)),
            description_folded: ActiveValue::Set(fold_case(&tx.description)),
        }
    }
}

impl From<Model> for Transaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            price: model.price,
            category: model.category,
            sold: model.sold,
            date_of_sale: model.date_of_sale,
            image: model.image,
        }
    }
}
