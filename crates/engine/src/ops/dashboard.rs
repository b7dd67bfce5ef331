use std::future::Future;

use chrono::Month;

use crate::{EngineError, ResultEngine};

use super::{
    Engine,
    aggregates::{CategoryCount, PriceRangeCount, SalesStatistics},
    listing::{TransactionPage, TransactionQuery},
};

/// Every view of a month, as one payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub transactions: TransactionPage,
    pub statistics: SalesStatistics,
    pub price_ranges: Vec<PriceRangeCount>,
    pub categories: Vec<CategoryCount>,
}

/// Tags the error of a dashboard section with the section name.
async fn section<T>(
    name: &'static str,
    future: impl Future<Output = ResultEngine<T>>,
) -> ResultEngine<T> {
    future.await.map_err(|source| EngineError::Dashboard {
        section: name,
        source: Box::new(source),
    })
}

impl Engine {
    /// Builds the dashboard of a month.
    ///
    /// The four views are read concurrently. The first failing section fails
    /// the whole dashboard; no partial payload is returned. The listing uses
    /// the default page size, lowered to the configured maximum.
    pub async fn dashboard(&self, month: Month) -> ResultEngine<Dashboard> {
        let mut query = TransactionQuery::for_month(month);
        query.per_page = query.per_page.min(self.max_per_page);
        let (transactions, statistics, price_ranges, categories) = tokio::try_join!(
            section("transactions", self.list_transactions(&query)),
            section("statistics", self.statistics(month)),
            section("bar_chart", self.price_ranges(month)),
            section("pie_chart", self.categories(month))
        )?;

        Ok(Dashboard {
            transactions,
            statistics,
            price_ranges,
            categories,
        })
    }
}
