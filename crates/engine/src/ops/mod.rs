use std::sync::Arc;

use chrono::Month;
use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter};

use crate::{DatasetSource, ResultEngine, month::month_number, transactions};

mod aggregates;
mod dashboard;
mod listing;
mod seeding;

pub use aggregates::{CategoryCount, PriceRangeCount, SalesStatistics};
pub use dashboard::Dashboard;
pub use listing::{TransactionPage, TransactionQuery};

/// Default number of records per listing page.
pub const DEFAULT_PER_PAGE: u64 = 10;
/// Default upper bound for `per_page`.
pub const DEFAULT_MAX_PER_PAGE: u64 = 100;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Restricts a query to records sold in a given calendar month.
trait ApplyMonthFilter: QueryFilter + Sized {
    fn in_month(self, month: Month) -> Self;
}

impl<T> ApplyMonthFilter for T
where
    T: QueryFilter + Sized,
{
    fn in_month(self, month: Month) -> Self {
        self.filter(transactions::Column::SaleMonth.eq(month_number(month)))
    }
}

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    dataset: Option<Arc<dyn DatasetSource>>,
    max_per_page: u64,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn max_per_page(&self) -> u64 {
        self.max_per_page
    }
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    dataset: Option<Arc<dyn DatasetSource>>,
    max_per_page: u64,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            dataset: None,
            max_per_page: DEFAULT_MAX_PER_PAGE,
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Source used by [`Engine::seed`].
    pub fn dataset(mut self, dataset: impl DatasetSource + 'static) -> EngineBuilder {
        self.dataset = Some(Arc::new(dataset));
        self
    }

    /// Largest accepted `per_page` for listings.
    pub fn max_per_page(mut self, max_per_page: u64) -> EngineBuilder {
        self.max_per_page = max_per_page;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            dataset: self.dataset,
            max_per_page: self.max_per_page.max(1),
        })
    }
}
