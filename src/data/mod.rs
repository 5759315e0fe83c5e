//! Data module - CSV loading, typed records and filtering

mod cache;
mod filter;
mod loader;
mod record;

pub use cache::DatasetCache;
pub use filter::{filter, FilterSelection, ProductSet, YearRange, DEFAULT_PRODUCT_SELECTION};
pub use loader::{
    parse_order_date, parse_price, parse_quantity, DataLoader, LoadError, LoadOptions,
    LoadSummary, SourceEncoding,
};
pub use record::{Dataset, SalesRecord, YearMonth};
