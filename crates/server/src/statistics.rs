//! Statistics and chart API endpoints

use api_types::{
    month::MonthQuery,
    stats::{BarChart, CategoryCount, PieChart, Statistics},
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use crate::{ServerError, resolve_month, server::ServerState};

pub(crate) fn map_statistics(stats: engine::SalesStatistics) -> Statistics {
    Statistics {
        total_sale_amount: stats.total_sale_amount,
        total_sold_items: stats.total_sold_items,
        total_not_sold_items: stats.total_not_sold_items,
    }
}

pub(crate) fn map_bar_chart(ranges: Vec<engine::PriceRangeCount>) -> BarChart {
    ranges
        .into_iter()
        .map(|range| (range.bucket.label(), range.count))
        .collect()
}

pub(crate) fn map_pie_chart(categories: Vec<engine::CategoryCount>) -> PieChart {
    categories
        .into_iter()
        .map(|entry| CategoryCount {
            category: entry.category,
            count: entry.count,
        })
        .collect()
}

/// Handle requests for the sales statistics of a month
pub async fn get_stats(
    State(state): State<ServerState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Statistics>, ServerError> {
    let month = resolve_month(query)?;
    let stats = state.engine.statistics(month).await?;
    Ok(Json(map_statistics(stats)))
}

/// Handle requests for the price range histogram of a month
pub async fn bar_chart(
    State(state): State<ServerState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<BarChart>, ServerError> {
    let month = resolve_month(query)?;
    let ranges = state.engine.price_ranges(month).await?;
    Ok(Json(map_bar_chart(ranges)))
}

/// Handle requests for the category breakdown of a month
pub async fn pie_chart(
    State(state): State<ServerState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<PieChart>, ServerError> {
    let month = resolve_month(query)?;
    let categories = state.engine.categories(month).await?;
    Ok(Json(map_pie_chart(categories)))
}
