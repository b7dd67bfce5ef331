//! Seeding endpoint

use api_types::seed::InitResponse;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

/// Replace the stored transactions with the upstream dataset.
pub async fn init(State(state): State<ServerState>) -> Result<Json<InitResponse>, ServerError> {
    let count = state.engine.seed().await?;
    tracing::info!("database seeded with {count} transactions");

    Ok(Json(InitResponse {
        message: "Database seeded successfully".to_string(),
        count,
    }))
}
