//! CSV Data Loader Module
//! Reads the sales export with Polars, renames columns to canonical names,
//! coerces types and builds typed [`SalesRecord`]s.

use super::record::{Dataset, SalesRecord};
use chrono::{NaiveDate, NaiveDateTime};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use polars::prelude::*;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

pub const ORDER_ID: &str = "Order ID";
pub const PRODUCT: &str = "Product";
pub const QUANTITY_ORDERED: &str = "Quantity Ordered";
pub const PRICE_EACH: &str = "Price Each";
pub const ORDER_DATE: &str = "Order Date";
pub const PURCHASE_ADDRESS: &str = "Purchase Address";
pub const CITY: &str = "CITY";

/// Source column -> canonical column.
const COLUMN_MAP: [(&str, &str); 7] = [
    ("ORDERNUMBER", ORDER_ID),
    ("PRODUCTLINE", PRODUCT),
    ("QUANTITYORDERED", QUANTITY_ORDERED),
    ("PRICEEACH", PRICE_EACH),
    ("ORDERDATE", ORDER_DATE),
    ("ADDRESSLINE1", PURCHASE_ADDRESS),
    ("CITY", CITY),
];

const DATETIME_FORMATS: [&str; 5] = [
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode {} as {encoding}", path.display())]
    Decode {
        path: PathBuf,
        encoding: SourceEncoding,
    },
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Character set of the source file, resolved from a WHATWG label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceEncoding(&'static Encoding);

impl Hash for SourceEncoding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name().hash(state);
    }
}

impl Default for SourceEncoding {
    fn default() -> Self {
        Self::latin1()
    }
}

impl SourceEncoding {
    /// `latin1` / `ISO-8859-1`, which the WHATWG table maps to windows-1252.
    pub fn latin1() -> Self {
        Self(WINDOWS_1252)
    }

    pub fn utf8() -> Self {
        Self(UTF_8)
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.0
    }

    /// Decode the whole file. A byte order mark overrides the configured
    /// encoding and is stripped; malformed input yields `None`.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let (encoding, bom_len) = Encoding::for_bom(bytes).unwrap_or((self.0, 0));
        encoding
            .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
            .map(|text| text.into_owned())
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

impl FromStr for SourceEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::for_label(s.trim().as_bytes())
            .map(Self)
            .ok_or_else(|| format!("unknown encoding '{}'", s.trim()))
    }
}

/// Identifies a source: two loads with equal options read the same data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadOptions {
    pub path: PathBuf,
    pub encoding: SourceEncoding,
}

impl LoadOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: SourceEncoding::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Row counts from one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Loads and cleans sales exports.
pub struct DataLoader;

impl DataLoader {
    /// Load a sales CSV from disk.
    pub fn load(options: &LoadOptions) -> Result<Dataset, LoadError> {
        Self::load_with_summary(options).map(|(dataset, _)| dataset)
    }

    pub fn load_with_summary(options: &LoadOptions) -> Result<(Dataset, LoadSummary), LoadError> {
        let text = Self::read_source(&options.path, options.encoding)?;
        let (dataset, summary) = Self::load_str(&text)?;
        info!(
            path = %options.path.display(),
            rows = dataset.len(),
            dropped = summary.rows_dropped,
            "loaded sales data"
        );
        Ok((dataset, summary))
    }

    /// Parse already decoded CSV text.
    pub fn load_str(text: &str) -> Result<(Dataset, LoadSummary), LoadError> {
        let raw = Self::read_frame(text)?;
        let df = Self::rename_columns(raw)?;
        Self::build_records(&df)
    }

    fn read_source(path: &Path, encoding: SourceEncoding) -> Result<String, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        encoding.decode(&bytes).ok_or_else(|| LoadError::Decode {
            path: path.to_path_buf(),
            encoding,
        })
    }

    /// Every column is read as text so coercion below never fails the load.
    fn read_frame(text: &str) -> Result<DataFrame, LoadError> {
        let mut cursor = Cursor::new(text.as_bytes());
        let opts = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true);
        let df = opts.into_reader_with_file_handle(&mut cursor).finish()?;
        debug!(rows = df.height(), columns = df.width(), "read csv frame");
        Ok(df)
    }

    fn rename_columns(df: DataFrame) -> Result<DataFrame, LoadError> {
        for (source, _) in COLUMN_MAP {
            if df.column(source).is_err() {
                return Err(LoadError::MissingColumn(source.to_string()));
            }
        }

        let exprs: Vec<Expr> = COLUMN_MAP
            .iter()
            .map(|(source, canonical)| col(*source).alias(*canonical))
            .collect();

        Ok(df.lazy().select(exprs).collect()?)
    }

    fn build_records(df: &DataFrame) -> Result<(Dataset, LoadSummary), LoadError> {
        let order_ids = df.column(ORDER_ID)?.str()?;
        let products = df.column(PRODUCT)?.str()?;
        let quantities = df.column(QUANTITY_ORDERED)?.str()?;
        let prices = df.column(PRICE_EACH)?.str()?;
        let dates = df.column(ORDER_DATE)?.str()?;
        let addresses = df.column(PURCHASE_ADDRESS)?.str()?;
        let cities = df.column(CITY)?.str()?;

        let mut records = Vec::with_capacity(df.height());
        let mut dropped = 0usize;

        for i in 0..df.height() {
            let quantity = quantities.get(i).and_then(parse_quantity);
            let price = prices.get(i).and_then(parse_price);
            let date = dates.get(i).and_then(parse_order_date);

            let (Some(quantity), Some(price), Some(date)) = (quantity, price, date) else {
                dropped += 1;
                continue;
            };

            records.push(SalesRecord::new(
                clean_text(order_ids.get(i)),
                clean_text(products.get(i)),
                quantity,
                price,
                date,
                clean_text(addresses.get(i)),
                clean_text(cities.get(i)),
            ));
        }

        if dropped > 0 {
            debug!(dropped, "dropped rows with missing date, quantity or price");
        }

        let summary = LoadSummary {
            rows_read: df.height(),
            rows_dropped: dropped,
        };
        Ok((Dataset::from_records(records), summary))
    }
}

/// Trimmed text, `None` when blank.
fn clean_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Non-negative whole number; `"30"` and `"30.0"` both parse.
pub fn parse_quantity(raw: &str) -> Option<u32> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return None;
    }
    Some(value as u32)
}

/// Non-negative finite decimal.
pub fn parse_price(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Accepts the date layouts found in sales exports; date-only values land at midnight.
pub fn parse_order_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
