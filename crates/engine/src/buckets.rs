//! Fixed price ranges used by the bar chart.
//!
//! Labels read as inclusive integer ranges (`0-100`, `101-200`, ...,
//! `901-above`). Membership is gap-free: every bucket after the first starts
//! right above the previous upper bound, so a price of `100.5` belongs to
//! `101-200`.

use std::ops::{Bound, RangeBounds};

use sea_orm::{ColumnTrait, Condition};

use crate::transactions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceBucket {
    min: u32,
    max: Option<u32>,
}

pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket::bounded(0, 100),
    PriceBucket::bounded(101, 200),
    PriceBucket::bounded(201, 300),
    PriceBucket::bounded(301, 400),
    PriceBucket::bounded(401, 500),
    PriceBucket::bounded(501, 600),
    PriceBucket::bounded(601, 700),
    PriceBucket::bounded(701, 800),
    PriceBucket::bounded(801, 900),
    PriceBucket::unbounded(901),
];

impl PriceBucket {
    const fn bounded(min: u32, max: u32) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    const fn unbounded(min: u32) -> Self {
        Self { min, max: None }
    }

    /// `"<min>-<max>"`, or `"<min>-above"` for the last bucket.
    pub fn label(&self) -> String {
        match self.max {
            Some(max) => format!("{}-{}", self.min, max),
            None => format!("{}-above", self.min),
        }
    }

    fn lower(&self) -> Bound<f64> {
        match self.min {
            0 => Bound::Included(0.0),
            min => Bound::Excluded(f64::from(min - 1)),
        }
    }

    fn upper(&self) -> Bound<f64> {
        match self.max {
            Some(max) => Bound::Included(f64::from(max)),
            None => Bound::Unbounded,
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        (self.lower(), self.upper()).contains(&price)
    }

    /// Store filter selecting the prices that fall in this bucket.
    pub(crate) fn condition(&self) -> Condition {
        let price = transactions::Column::Price;
        let mut condition = Condition::all();
        condition = match self.lower() {
            Bound::Included(min) => condition.add(price.gte(min)),
            Bound::Excluded(min) => condition.add(price.gt(min)),
            Bound::Unbounded => condition,
        };
        match self.upper() {
            Bound::Included(max) => condition.add(price.lte(max)),
            Bound::Excluded(max) => condition.add(price.lt(max)),
            Bound::Unbounded => condition,
        }
    }
}

/// Returns the bucket a price belongs to. Negative prices have none.
pub fn bucket_for(price: f64) -> Option<PriceBucket> {
    PRICE_BUCKETS.into_iter().find(|bucket| bucket.contains(price))
}
