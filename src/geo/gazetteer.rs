//! Gazetteer Module
//! Fixed city-name to coordinate table and map row enrichment.

use crate::stats::CityMetrics;

/// Revenue represented by one unit of marker radius.
pub const MARKER_REVENUE_SCALE: f64 = 100_000.0;

/// (city, latitude, longitude)
const BUILTIN_CITIES: [(&str, f64, f64); 5] = [
    ("Madrid", 40.4168, -3.7038),
    ("San Rafael", 37.9735, -122.5311),
    ("NYC", 40.7128, -74.0060),
    ("Singapore", 1.3521, 103.8198),
    ("Paris", 48.8566, 2.3522),
];

/// A city placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRow {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_revenue: f64,
    /// `total_revenue / MARKER_REVENUE_SCALE`
    pub marker_radius: f64,
}

/// City lookup table.
#[derive(Debug, Clone, Copy)]
pub struct Gazetteer {
    entries: &'static [(&'static str, f64, f64)],
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Gazetteer {
    pub fn builtin() -> Self {
        Self {
            entries: &BUILTIN_CITIES,
        }
    }

    /// Exact-name lookup returning `(latitude, longitude)`.
    pub fn lookup(&self, city: &str) -> Option<(f64, f64)> {
        self.entries
            .iter()
            .find(|(name, _, _)| *name == city)
            .map(|&(_, lat, lon)| (lat, lon))
    }

    /// Attach coordinates to city metrics, dropping cities not in the table.
    pub fn enrich(&self, cities: &[CityMetrics]) -> Vec<GeoRow> {
        cities
            .iter()
            .filter_map(|metrics| {
                let (latitude, longitude) = self.lookup(&metrics.city)?;
                Some(GeoRow {
                    city: metrics.city.clone(),
                    latitude,
                    longitude,
                    total_revenue: metrics.total_revenue,
                    marker_radius: marker_radius(metrics.total_revenue),
                })
            })
            .collect()
    }
}

fn marker_radius(total_revenue: f64) -> f64 {
    total_revenue / MARKER_REVENUE_SCALE
}
