use chrono::Month;
use sea_orm::{
    Condition, PaginatorTrait, QueryFilter, QueryOrder, prelude::*,
    sea_query::{Expr, LikeExpr},
};

use crate::{EngineError, ResultEngine, Transaction, month::DEFAULT_MONTH, transactions};

use super::{ApplyMonthFilter, DEFAULT_PER_PAGE, Engine};

/// Parameters of a transaction listing.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionQuery {
    pub month: Month,
    /// Free text; empty means no search constraint.
    pub search: String,
    /// 1-based page number.
    pub page: u64,
    pub per_page: u64,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self::for_month(DEFAULT_MONTH)
    }
}

impl TransactionQuery {
    /// First page of a month with the default page size and no search.
    pub fn for_month(month: Month) -> Self {
        Self {
            month,
            search: String::new(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    fn validate(&self, max_per_page: u64) -> ResultEngine<()> {
        if self.page == 0 {
            return Err(EngineError::InvalidPagination(
                "page must be >= 1".to_string(),
            ));
        }
        if self.per_page == 0 {
            return Err(EngineError::InvalidPagination(
                "perPage must be >= 1".to_string(),
            ));
        }
        if self.per_page > max_per_page {
            return Err(EngineError::InvalidPagination(format!(
                "perPage must be <= {max_per_page}"
            )));
        }
        if self.offset().is_none() {
            return Err(EngineError::InvalidPagination(
                "page is out of range".to_string(),
            ));
        }
        Ok(())
    }

    /// Rows skipped before this page, if the store can address it.
    fn offset(&self) -> Option<u64> {
        self.page
            .checked_sub(1)?
            .checked_mul(self.per_page)
            .filter(|offset| i64::try_from(*offset).is_ok())
    }
}

/// One page of matching transactions.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionPage {
    pub data: Vec<Transaction>,
    /// Number of matches across all pages.
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// Escapes `LIKE` metacharacters so the search is matched literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Numeric value of the search text, when it is one.
fn search_price(search: &str) -> Option<f64> {
    search.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Title/description substring match, or exact price match for numeric text.
///
/// Text is compared against the folded columns, lowercased the same way as
/// the search.
fn search_condition(search: &str) -> Option<Condition> {
    let search = search.trim();
    if search.is_empty() {
        return None;
    }

    let pattern = format!("%{}%", escape_like(&transactions::fold_case(search)));
    let like = || LikeExpr::new(pattern.clone()).escape('\\');
    let mut condition = Condition::any()
        .add(Expr::col(transactions::Column::TitleFolded).like(like()))
        .add(Expr::col(transactions::Column::DescriptionFolded).like(like()));
    if let Some(price) = search_price(search) {
        condition = condition.add(transactions::Column::Price.eq(price));
    }
    Some(condition)
}

impl Engine {
    /// Lists the transactions of a month, optionally narrowed by a search,
    /// one page at a time in insertion order.
    pub async fn list_transactions(&self, query: &TransactionQuery) -> ResultEngine<TransactionPage> {
        query.validate(self.max_per_page)?;
        tracing::debug!(
            "listing transactions month={:?} search={:?} page={} per_page={}",
            query.month,
            query.search,
            query.page,
            query.per_page
        );

        let mut select = transactions::Entity::find().in_month(query.month);
        if let Some(condition) = search_condition(&query.search) {
            select = select.filter(condition);
        }

        let paginator = select
            .order_by_asc(transactions::Column::RowId)
            .paginate(&self.database, query.per_page);
        let total = paginator.num_items().await?;
        let data = paginator
            .fetch_page(query.page - 1)
            .await?
            .into_iter()
            .map(Transaction::from)
            .collect();

        Ok(TransactionPage {
            data,
            total,
            page: query.page,
            per_page: query.per_page,
        })
    }
}
