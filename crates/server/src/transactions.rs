//! Transactions API endpoints

use api_types::transaction::{TransactionListQuery, TransactionListResponse, TransactionView};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{ServerError, server::ServerState};

pub(crate) fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        title: tx.title,
        description: tx.description,
        price: tx.price,
        category: tx.category,
        sold: tx.sold,
        date_of_sale: tx.date_of_sale,
        image: tx.image,
    }
}

pub(crate) fn map_page(page: engine::TransactionPage) -> TransactionListResponse {
    TransactionListResponse {
        data: page.data.into_iter().map(map_transaction).collect(),
        total: page.total,
        page: page.page,
        per_page: page.per_page,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<TransactionListQuery>, QueryRejection>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let Query(query) = query?;

    let mut request = engine::TransactionQuery::for_month(engine::parse_month_or_default(
        query.month.as_deref(),
    )?);
    if let Some(search) = query.search {
        request.search = search;
    }
    if let Some(page) = query.page {
        request.page = page;
    }
    if let Some(per_page) = query.per_page {
        request.per_page = per_page;
    }

    let page = state.engine.list_transactions(&request).await?;
    Ok(Json(map_page(page)))
}
