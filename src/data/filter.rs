//! Filter Module
//! Narrows a dataset to the user's year range and product selection.

use super::record::{Dataset, SalesRecord};
use std::collections::BTreeSet;

/// Number of products selected when a dataset is first shown.
pub const DEFAULT_PRODUCT_SELECTION: usize = 5;

/// Set of product lines to keep.
pub type ProductSet = BTreeSet<String>;

/// Inclusive year bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

impl YearRange {
    pub fn new(from: i32, to: i32) -> Self {
        Self { from, to }
    }

    /// A reversed range contains nothing.
    pub fn contains(&self, year: i32) -> bool {
        self.from <= year && year <= self.to
    }
}

/// Keep rows whose year is inside `years` and whose product is in `products`.
///
/// Returns a new dataset; rows without a product never match.
pub fn filter(dataset: &Dataset, years: YearRange, products: &ProductSet) -> Dataset {
    if products.is_empty() {
        return Dataset::default();
    }

    dataset
        .records()
        .iter()
        .filter(|r| matches(r, years, products))
        .cloned()
        .collect()
}

fn matches(record: &SalesRecord, years: YearRange, products: &ProductSet) -> bool {
    years.contains(record.year())
        && record
            .product
            .as_deref()
            .is_some_and(|p| products.contains(p))
}

/// Current filter choices of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub years: YearRange,
    pub products: ProductSet,
}

impl FilterSelection {
    /// Full year bounds and the first few products of the dataset.
    pub fn initial(dataset: &Dataset) -> Self {
        let years = dataset.year_bounds().unwrap_or(YearRange::new(0, 0));
        let products = dataset
            .products_in_years(years)
            .into_iter()
            .take(DEFAULT_PRODUCT_SELECTION)
            .collect();
        Self { years, products }
    }

    /// Full year bounds and every product.
    ///
    /// Applying it returns the dataset unchanged only when every row has a
    /// product; rows without one are still excluded.
    pub fn everything(dataset: &Dataset) -> Self {
        let years = dataset.year_bounds().unwrap_or(YearRange::new(0, 0));
        Self {
            years,
            products: dataset.products().into_iter().collect(),
        }
    }

    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        filter(dataset, self.years, &self.products)
    }
}
