//! Record store access for the transaction dashboard.
//!
//! The [`Engine`] owns a database handle and answers every read the
//! dashboard needs (listing, statistics, price ranges, categories) for a
//! calendar month. [`Engine::seed`] replaces the stored records with the
//! configured [`DatasetSource`].

pub use buckets::{PRICE_BUCKETS, PriceBucket, bucket_for};
pub use error::EngineError;
pub use month::{DEFAULT_MONTH, parse_month, parse_month_or_default};
pub use ops::{
    CategoryCount, DEFAULT_MAX_PER_PAGE, DEFAULT_PER_PAGE, Dashboard, Engine, EngineBuilder,
    PriceRangeCount, SalesStatistics, TransactionPage, TransactionQuery,
};
pub use seed::{
    DEFAULT_DATASET_URL, DatasetSource, HttpDataset, RawDate, RawTransaction, StaticDataset,
    normalize_date,
};
pub use transactions::Transaction;

pub use chrono::Month;

mod buckets;
mod error;
mod month;
mod ops;
mod seed;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
