//! Metric Aggregator Module
//! Grouping and summarization over a sales dataset.

use crate::data::{Dataset, SalesRecord, YearMonth};
use std::collections::{BTreeMap, HashSet};

/// Number of rows kept by the city analysis.
pub const TOP_CITY_COUNT: usize = 5;

/// Headline figures for a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlobalMetrics {
    pub total_revenue: f64,
    pub total_units: u64,
    /// Revenue per distinct order, 0 when there are no orders.
    pub average_order_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRevenue {
    pub month: YearMonth,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductMetrics {
    pub product: String,
    pub total_revenue: f64,
    pub total_units_sold: u64,
    pub average_price_per_unit: f64,
    pub total_orders: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyMetrics {
    pub month: YearMonth,
    pub total_revenue: f64,
    pub total_units_sold: u64,
    pub average_price_per_unit: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityMetrics {
    pub city: String,
    pub total_revenue: f64,
    pub total_units_sold: u64,
}

/// Running sums for one group.
#[derive(Default)]
struct GroupTotals<'a> {
    revenue: f64,
    units: u64,
    price_sum: f64,
    rows: usize,
    orders: HashSet<&'a str>,
}

impl<'a> GroupTotals<'a> {
    fn add(&mut self, record: &'a SalesRecord) {
        self.revenue += record.total_revenue();
        self.units += u64::from(record.quantity_ordered);
        self.price_sum += record.price_each;
        self.rows += 1;
        if let Some(id) = record.order_id.as_deref() {
            self.orders.insert(id);
        }
    }

    /// Groups only exist once a row was added, so `rows` is never zero here.
    fn mean_price(&self) -> f64 {
        self.price_sum / self.rows as f64
    }
}

fn group_by<'a, K: Ord>(
    records: &'a [SalesRecord],
    key: impl Fn(&'a SalesRecord) -> Option<K>,
) -> BTreeMap<K, GroupTotals<'a>> {
    let mut groups: BTreeMap<K, GroupTotals<'a>> = BTreeMap::new();
    for record in records {
        if let Some(k) = key(record) {
            groups.entry(k).or_default().add(record);
        }
    }
    groups
}

/// Pure aggregations; an empty dataset always gives empty results.
pub struct MetricAggregator;

impl MetricAggregator {
    pub fn global_metrics(dataset: &Dataset) -> GlobalMetrics {
        let mut totals = GroupTotals::default();
        for record in dataset.records() {
            totals.add(record);
        }

        let distinct_orders = totals.orders.len();
        let average_order_value = if distinct_orders > 0 {
            totals.revenue / distinct_orders as f64
        } else {
            0.0
        };

        GlobalMetrics {
            total_revenue: totals.revenue,
            total_units: totals.units,
            average_order_value,
        }
    }

    /// Revenue per month, oldest first.
    pub fn monthly_trend(dataset: &Dataset) -> Vec<MonthlyRevenue> {
        group_by(dataset.records(), |r| Some(r.month()))
            .into_iter()
            .map(|(month, totals)| MonthlyRevenue {
                month,
                total_revenue: totals.revenue,
            })
            .collect()
    }

    /// One row per product line, ordered by product name.
    pub fn product_analysis(dataset: &Dataset) -> Vec<ProductMetrics> {
        group_by(dataset.records(), |r| r.product.as_deref())
            .into_iter()
            .map(|(product, totals)| ProductMetrics {
                product: product.to_string(),
                total_revenue: totals.revenue,
                total_units_sold: totals.units,
                average_price_per_unit: totals.mean_price(),
                total_orders: totals.orders.len(),
            })
            .collect()
    }

    /// One row per month, oldest first.
    pub fn monthly_analysis(dataset: &Dataset) -> Vec<MonthlyMetrics> {
        group_by(dataset.records(), |r| Some(r.month()))
            .into_iter()
            .map(|(month, totals)| MonthlyMetrics {
                month,
                total_revenue: totals.revenue,
                total_units_sold: totals.units,
                average_price_per_unit: totals.mean_price(),
            })
            .collect()
    }

    /// Top cities by revenue, highest first.
    ///
    /// Cities are grouped alphabetically and the sort is stable, so equal
    /// revenues keep alphabetical order.
    pub fn city_analysis(dataset: &Dataset) -> Vec<CityMetrics> {
        let mut cities: Vec<CityMetrics> = group_by(dataset.records(), |r| r.city.as_deref())
            .into_iter()
            .map(|(city, totals)| CityMetrics {
                city: city.to_string(),
                total_revenue: totals.revenue,
                total_units_sold: totals.units,
            })
            .collect();

        cities.sort_by(|a, b| {
            b.total_revenue
                .partial_cmp(&a.total_revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        cities.truncate(TOP_CITY_COUNT);
        cities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(order: &str, product: &str, qty: u32, price: f64, city: &str, ym: (i32, u32)) -> SalesRecord {
        let date = NaiveDate::from_ymd_opt(ym.0, ym.1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        SalesRecord::new(
            Some(order.into()),
            Some(product.into()),
            qty,
            price,
            date,
            None,
            Some(city.into()),
        )
    }

    fn three_rows() -> Dataset {
        Dataset::from_records(vec![
            row("1", "Classic Cars", 2, 10.0, "NYC", (2003, 1)),
            row("1", "Classic Cars", 1, 10.0, "NYC", (2003, 1)),
            row("2", "Vintage", 5, 4.0, "Paris", (2003, 2)),
        ])
    }

    #[test]
    fn global_metrics_example() {
        let m = MetricAggregator::global_metrics(&three_rows());
        assert_eq!(m.total_revenue, 50.0);
        assert_eq!(m.total_units, 8);
        assert_eq!(m.average_order_value, 25.0);
    }

    #[test]
    fn average_order_value_is_zero_without_orders() {
        let m = MetricAggregator::global_metrics(&Dataset::default());
        assert_eq!(m, GlobalMetrics::default());

        let date = NaiveDate::from_ymd_opt(2003, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let anonymous = Dataset::from_records(vec![SalesRecord::new(
            None, None, 3, 2.0, date, None, None,
        )]);
        let m = MetricAggregator::global_metrics(&anonymous);
        assert_eq!(m.total_revenue, 6.0);
        assert_eq!(m.average_order_value, 0.0);
    }

    #[test]
    fn product_analysis_counts_distinct_orders() {
        let products = MetricAggregator::product_analysis(&three_rows());
        assert_eq!(products.len(), 2);

        let cars = &products[0];
        assert_eq!(cars.product, "Classic Cars");
        assert_eq!(cars.total_revenue, 30.0);
        assert_eq!(cars.total_units_sold, 3);
        assert_eq!(cars.average_price_per_unit, 10.0);
        assert_eq!(cars.total_orders, 1);

        assert_eq!(products[1].product, "Vintage");
        assert_eq!(products[1].total_orders, 1);
    }

    #[test]
    fn average_price_is_mean_of_unit_prices() {
        let ds = Dataset::from_records(vec![
            row("1", "Ships", 100, 10.0, "NYC", (2003, 1)),
            row("2", "Ships", 1, 20.0, "NYC", (2003, 1)),
        ]);
        let monthly = MetricAggregator::monthly_analysis(&ds);
        assert_eq!(monthly[0].average_price_per_unit, 15.0);
    }

    #[test]
    fn monthly_results_are_chronological() {
        let ds = Dataset::from_records(vec![
            row("3", "Ships", 1, 1.0, "NYC", (2004, 1)),
            row("1", "Ships", 1, 2.0, "NYC", (2003, 11)),
            row("2", "Ships", 1, 4.0, "NYC", (2003, 11)),
        ]);
        let trend = MetricAggregator::monthly_trend(&ds);
        assert_eq!(
            trend.iter().map(|m| m.month).collect::<Vec<_>>(),
            vec![YearMonth::new(2003, 11), YearMonth::new(2004, 1)]
        );
        assert_eq!(trend[0].total_revenue, 6.0);

        let monthly = MetricAggregator::monthly_analysis(&ds);
        assert_eq!(monthly[0].month, YearMonth::new(2003, 11));
        assert_eq!(monthly[0].total_units_sold, 2);
        assert_eq!(monthly[1].average_price_per_unit, 1.0);
    }

    #[test]
    fn city_analysis_keeps_top_five_descending() {
        let cities = ["A", "B", "C", "D", "E", "F", "G"];
        let ds = Dataset::from_records(
            cities
                .iter()
                .enumerate()
                .map(|(i, c)| row("1", "Ships", 1, (i + 1) as f64, c, (2003, 1)))
                .collect(),
        );
        let top = MetricAggregator::city_analysis(&ds);
        assert_eq!(top.len(), TOP_CITY_COUNT);
        assert_eq!(
            top.iter().map(|c| c.city.as_str()).collect::<Vec<_>>(),
            vec!["G", "F", "E", "D", "C"]
        );
        assert!(top.windows(2).all(|w| w[0].total_revenue >= w[1].total_revenue));
    }

    #[test]
    fn city_ties_keep_alphabetical_order() {
        let ds = Dataset::from_records(vec![
            row("1", "Ships", 1, 5.0, "Paris", (2003, 1)),
            row("2", "Ships", 1, 5.0, "Madrid", (2003, 1)),
            row("3", "Ships", 1, 9.0, "NYC", (2003, 1)),
        ]);
        let top = MetricAggregator::city_analysis(&ds);
        assert_eq!(
            top.iter().map(|c| c.city.as_str()).collect::<Vec<_>>(),
            vec!["NYC", "Madrid", "Paris"]
        );
    }

    #[test]
    fn rows_without_keys_skip_their_groups() {
        let date = NaiveDate::from_ymd_opt(2003, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let ds = Dataset::from_records(vec![SalesRecord::new(
            Some("9".into()),
            None,
            1,
            1.0,
            date,
            None,
            None,
        )]);
        assert!(MetricAggregator::product_analysis(&ds).is_empty());
        assert!(MetricAggregator::city_analysis(&ds).is_empty());
        assert_eq!(MetricAggregator::monthly_analysis(&ds).len(), 1);
    }

    #[test]
    fn empty_input_gives_empty_tables() {
        let empty = Dataset::default();
        assert!(MetricAggregator::monthly_trend(&empty).is_empty());
        assert!(MetricAggregator::product_analysis(&empty).is_empty());
        assert!(MetricAggregator::monthly_analysis(&empty).is_empty());
        assert!(MetricAggregator::city_analysis(&empty).is_empty());
    }
}
