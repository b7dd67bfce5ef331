use chrono::Month;
use sea_orm::{
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, prelude::*, sea_query::Expr,
};

use crate::{PRICE_BUCKETS, PriceBucket, ResultEngine, transactions};

use super::{ApplyMonthFilter, Engine};

/// Sales totals of a month.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SalesStatistics {
    /// Sum of the prices of the sold items.
    pub total_sale_amount: f64,
    pub total_sold_items: u64,
    pub total_not_sold_items: u64,
}

/// Number of records whose price falls in a bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceRangeCount {
    pub bucket: PriceBucket,
    pub count: u64,
}

/// Number of records in a category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

impl Engine {
    /// Sold amount and item counts for a month.
    ///
    /// A month without sold items reports zero, not an error.
    pub async fn statistics(&self, month: Month) -> ResultEngine<SalesStatistics> {
        let (total_sale_amount, total_sold_items) = transactions::Entity::find()
            .select_only()
            .column_as(Expr::col(transactions::Column::Price).sum(), "total_sale_amount")
            .column_as(Expr::col(transactions::Column::RowId).count(), "total_sold_items")
            .in_month(month)
            .filter(transactions::Column::Sold.eq(true))
            .into_tuple::<(Option<f64>, i64)>()
            .one(&self.database)
            .await?
            .unwrap_or((None, 0));

        let total_not_sold_items = transactions::Entity::find()
            .in_month(month)
            .filter(transactions::Column::Sold.eq(false))
            .count(&self.database)
            .await?;

        Ok(SalesStatistics {
            total_sale_amount: total_sale_amount.unwrap_or(0.0),
            total_sold_items: u64::try_from(total_sold_items).unwrap_or_default(),
            total_not_sold_items,
        })
    }

    /// Record count per price bucket for a month.
    ///
    /// Always returns the ten buckets of [`PRICE_BUCKETS`], in order.
    pub async fn price_ranges(&self, month: Month) -> ResultEngine<Vec<PriceRangeCount>> {
        let mut counts = Vec::with_capacity(PRICE_BUCKETS.len());
        for bucket in PRICE_BUCKETS {
            let count = transactions::Entity::find()
                .in_month(month)
                .filter(bucket.condition())
                .count(&self.database)
                .await?;
            counts.push(PriceRangeCount { bucket, count });
        }
        Ok(counts)
    }

    /// Record count per category for a month, ordered by category.
    pub async fn categories(&self, month: Month) -> ResultEngine<Vec<CategoryCount>> {
        let rows = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Category)
            .column_as(Expr::col(transactions::Column::RowId).count(), "count")
            .in_month(month)
            .group_by(transactions::Column::Category)
            .order_by_asc(transactions::Column::Category)
            .into_tuple::<(String, i64)>()
            .all(&self.database)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category,
                count: u64::try_from(count).unwrap_or_default(),
            })
            .collect())
    }
}
