//! Dashboard API endpoint

use api_types::{dashboard::Dashboard, month::MonthQuery};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{
    ServerError, resolve_month,
    server::ServerState,
    statistics::{map_bar_chart, map_pie_chart, map_statistics},
    transactions::map_page,
};

/// Handle requests for every view of a month at once
pub async fn get(
    State(state): State<ServerState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Dashboard>, ServerError> {
    let month = resolve_month(query)?;
    let dashboard = state.engine.dashboard(month).await?;

    Ok(Json(Dashboard {
        transactions: map_page(dashboard.transactions),
        statistics: map_statistics(dashboard.statistics),
        bar_chart: map_bar_chart(dashboard.price_ranges),
        pie_chart: map_pie_chart(dashboard.categories),
    }))
}
