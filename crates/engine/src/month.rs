//! Month resolution.
//!
//! Requests name the month they want ("March", "march", " MARCH "). Only the
//! twelve English month names are accepted; anything else is rejected instead
//! of being coerced into some other month.

use chrono::Month;

use crate::{EngineError, ResultEngine};

/// Month used when a request does not name one.
pub const DEFAULT_MONTH: Month = Month::March;

const MONTH_NAMES: [(&str, Month); 12] = [
    ("january", Month::January),
    ("february", Month::February),
    ("march", Month::March),
    ("april", Month::April),
    ("may", Month::May),
    ("june", Month::June),
    ("july", Month::July),
    ("august", Month::August),
    ("september", Month::September),
    ("october", Month::October),
    ("november", Month::November),
    ("december", Month::December),
];

/// Resolves a month name, ignoring case and surrounding whitespace.
pub fn parse_month(input: &str) -> ResultEngine<Month> {
    let wanted = input.trim();
    MONTH_NAMES
        .iter()
        .find_map(|(name, month)| name.eq_ignore_ascii_case(wanted).then_some(*month))
        .ok_or_else(|| EngineError::InvalidMonth(wanted.to_string()))
}

/// Resolves an optional month name, falling back to [`DEFAULT_MONTH`].
pub fn parse_month_or_default(input: Option<&str>) -> ResultEngine<Month> {
    match input {
        Some(name) => parse_month(name),
        None => Ok(DEFAULT_MONTH),
    }
}

/// Calendar number (1-12) stored in the `sale_month` column.
pub(crate) fn month_number(month: Month) -> i32 {
    month.number_from_month() as i32
}
