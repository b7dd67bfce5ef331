use axum::{
    Json,
    extract::{Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::{EngineError, Month};

use api_types::{ErrorResponse, month::MonthQuery};
pub use server::{router, run_with_listener};

mod dashboard;
mod seed;
mod server;
mod statistics;
mod transactions;

pub mod types {
    pub mod seed {
        pub use api_types::seed::InitResponse;
    }

    pub mod transaction {
        pub use api_types::transaction::{
            TransactionListQuery, TransactionListResponse, TransactionView,
        };
    }

    pub mod stats {
        pub use api_types::stats::{BarChart, CategoryCount, PieChart, Statistics};
    }

    pub mod dashboard {
        pub use api_types::dashboard::Dashboard;
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidMonth(_) | EngineError::InvalidPagination(_) => {
            StatusCode::BAD_REQUEST
        }
        EngineError::SeedFetch(_) => StatusCode::BAD_GATEWAY,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::Dashboard { source, .. } => status_for_engine_error(source),
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err.root() {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::SeedFetch(reason) => {
            tracing::error!("seed failed: {reason}");
            err.to_string()
        }
        _ => err.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

/// Month named by a `?month=` query, March when absent.
fn resolve_month(query: Result<Query<MonthQuery>, QueryRejection>) -> Result<Month, ServerError> {
    let Query(query) = query?;
    Ok(engine::parse_month_or_default(query.month.as_deref())?)
}
