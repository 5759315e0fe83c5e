//! Stats module - sales aggregations and dashboard snapshots

mod aggregator;
mod snapshot;

pub use aggregator::{
    CityMetrics, GlobalMetrics, MetricAggregator, MonthlyMetrics, MonthlyRevenue, ProductMetrics,
    TOP_CITY_COUNT,
};
pub use snapshot::DashboardSnapshot;
