//! Dashboard Snapshot Module
//! Every figure the dashboard shows for one filter selection.

use super::aggregator::{
    CityMetrics, GlobalMetrics, MetricAggregator, MonthlyMetrics, MonthlyRevenue, ProductMetrics,
};
use crate::data::{Dataset, FilterSelection};
use crate::geo::{Gazetteer, GeoRow};
use std::time::Instant;
use tracing::debug;

/// Outputs handed to the rendering layer.
///
/// `global` and `trend` describe the full dataset; the remaining tables
/// describe the filtered view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSnapshot {
    pub global: GlobalMetrics,
    pub trend: Vec<MonthlyRevenue>,
    pub products: Vec<ProductMetrics>,
    pub monthly: Vec<MonthlyMetrics>,
    pub cities: Vec<CityMetrics>,
    pub geo: Vec<GeoRow>,
    pub filtered_rows: usize,
}

impl DashboardSnapshot {
    /// Compute all outputs, running the independent aggregations with rayon.
    pub fn compute(full: &Dataset, selection: &FilterSelection, gazetteer: &Gazetteer) -> Self {
        let start = Instant::now();
        let view = selection.apply(full);

        let ((global, trend), (products, (monthly, cities))) = rayon::join(
            || {
                rayon::join(
                    || MetricAggregator::global_metrics(full),
                    || MetricAggregator::monthly_trend(full),
                )
            },
            || {
                rayon::join(
                    || MetricAggregator::product_analysis(&view),
                    || {
                        rayon::join(
                            || MetricAggregator::monthly_analysis(&view),
                            || MetricAggregator::city_analysis(&view),
                        )
                    },
                )
            },
        );
        let geo = gazetteer.enrich(&cities);

        debug!(
            rows = view.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "dashboard snapshot computed"
        );

        Self {
            global,
            trend,
            products,
            monthly,
            cities,
            geo,
            filtered_rows: view.len(),
        }
    }
}
