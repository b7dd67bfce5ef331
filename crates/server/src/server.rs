use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::sync::Arc;

use crate::{dashboard, seed, statistics, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn api(state: ServerState) -> Router {
    Router::new()
        .route("/init", get(seed::init))
        .route("/transactions", get(transactions::list))
        .route("/statistics", get(statistics::get_stats))
        .route("/bar-chart", get(statistics::bar_chart))
        .route("/pie-chart", get(statistics::pie_chart))
        .route("/dashboard", get(dashboard::get))
        .with_state(state)
}

/// Every endpoint under `/api`, with CORS open to any origin and request
/// tracing.
pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .nest("/api", api(ServerState { engine }))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(Arc::new(engine))).await
}
