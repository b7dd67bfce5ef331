//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidMonth`] thrown when a month name is not one of the twelve
//!   calendar months.
//! - [`InvalidPagination`] thrown when `page`/`per_page` are out of range.
//! - [`SeedFetch`] thrown when the upstream dataset is unreachable or
//!   malformed.
//! - [`Database`] thrown when the record store fails a read or a write.
//! - [`Dashboard`] thrown when one section of the dashboard fails.
//!
//!  [`InvalidMonth`]: EngineError::InvalidMonth
//!  [`InvalidPagination`]: EngineError::InvalidPagination
//!  [`SeedFetch`]: EngineError::SeedFetch
//!  [`Database`]: EngineError::Database
//!  [`Dashboard`]: EngineError::Dashboard
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid month: \"{0}\"")]
    InvalidMonth(String),
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),
    #[error("Failed to fetch seed dataset: {0}")]
    SeedFetch(String),
    #[error("Dashboard section {section} failed: {source}")]
    Dashboard {
        section: &'static str,
        source: Box<EngineError>,
    },
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Returns the innermost error, unwrapping dashboard sections.
    pub fn root(&self) -> &EngineError {
        match self {
            Self::Dashboard { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(value: reqwest::Error) -> Self {
        Self::SeedFetch(value.to_string())
    }
}
