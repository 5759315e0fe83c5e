//! Sales Record Module
//! Strongly typed sales rows and the immutable dataset built from them.

use chrono::{Datelike, NaiveDateTime};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::filter::YearRange;

/// Calendar month bucket, ordered by time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }

    /// Months since year 0, used as a continuous x coordinate by charts.
    pub fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One order line item.
///
/// Revenue, year and month are derived in [`SalesRecord::new`] and cannot be
/// set independently of quantity, price and date.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub order_id: Option<String>,
    pub product: Option<String>,
    pub quantity_ordered: u32,
    pub price_each: f64,
    pub order_date: NaiveDateTime,
    pub purchase_address: Option<String>,
    pub city: Option<String>,
    total_revenue: f64,
    year: i32,
    month: YearMonth,
}

impl SalesRecord {
    pub fn new(
        order_id: Option<String>,
        product: Option<String>,
        quantity_ordered: u32,
        price_each: f64,
        order_date: NaiveDateTime,
        purchase_address: Option<String>,
        city: Option<String>,
    ) -> Self {
        Self {
            order_id,
            product,
            quantity_ordered,
            price_each,
            order_date,
            purchase_address,
            city,
            total_revenue: quantity_ordered as f64 * price_each,
            year: order_date.year(),
            month: YearMonth::from_datetime(&order_date),
        }
    }

    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }
}

/// Immutable collection of cleaned sales records.
///
/// Cloning is cheap: records are shared behind an `Arc`. Filtering builds a new
/// dataset and never touches this one.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Arc<[SalesRecord]>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::from_records(Vec::new())
    }
}

impl FromIterator<SalesRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = SalesRecord>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

impl Dataset {
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        Self {
            records: Arc::from(records),
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed `[min, max]` year, `None` when empty.
    pub fn year_bounds(&self) -> Option<YearRange> {
        let min = self.records.iter().map(SalesRecord::year).min()?;
        let max = self.records.iter().map(SalesRecord::year).max()?;
        Some(YearRange::new(min, max))
    }

    /// Distinct products in first-appearance order.
    pub fn products(&self) -> Vec<String> {
        Self::distinct_products(self.records.iter())
    }

    /// Distinct products among rows whose year falls in `years`.
    pub fn products_in_years(&self, years: YearRange) -> Vec<String> {
        Self::distinct_products(self.records.iter().filter(|r| years.contains(r.year())))
    }

    fn distinct_products<'a>(records: impl Iterator<Item = &'a SalesRecord>) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        records
            .filter_map(|r| r.product.as_deref())
            .filter(|p| seen.insert(p))
            .map(str::to_string)
            .collect()
    }
}
