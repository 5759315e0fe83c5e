//! Geo module - city coordinates for the revenue map

mod gazetteer;

pub use gazetteer::{Gazetteer, GeoRow, MARKER_REVENUE_SCALE};
