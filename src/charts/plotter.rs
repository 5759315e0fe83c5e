//! Chart Plotter Module
//! Interactive dashboard charts drawn with egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};
use sales_dashboard::data::YearMonth;
use sales_dashboard::format::format_currency;
use sales_dashboard::geo::GeoRow;
use sales_dashboard::stats::{CityMetrics, MonthlyMetrics, MonthlyRevenue};

pub const REVENUE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 5] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
];

/// Smallest marker drawn on the map, in points.
const MIN_MARKER_RADIUS: f32 = 2.0;

/// Draws the dashboard's charts.
pub struct ChartPlotter;

impl ChartPlotter {
    fn month_label(value: f64) -> String {
        YearMonth::from_ordinal(value.round() as i64).to_string()
    }

    fn month_points<T>(rows: &[T], x: impl Fn(&T) -> YearMonth, y: impl Fn(&T) -> f64) -> PlotPoints {
        rows.iter()
            .map(|r| [x(r).ordinal() as f64, y(r)])
            .collect()
    }

    /// Global revenue per month as a line with markers.
    pub fn draw_revenue_trend(ui: &mut egui::Ui, trend: &[MonthlyRevenue]) {
        Plot::new("global_revenue_trend")
            .height(280.0)
            .x_axis_label("Month")
            .y_axis_label("Total Revenue")
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| Self::month_label(mark.value))
            .label_formatter(|_name, value| {
                format!("{}\n{}", Self::month_label(value.x), format_currency(value.y))
            })
            .show(ui, |plot_ui| {
                let points = Self::month_points(trend, |r| r.month, |r| r.total_revenue);
                plot_ui.line(
                    Line::new(points)
                        .color(REVENUE_COLOR)
                        .width(2.0)
                        .name("Total Revenue"),
                );
                plot_ui.points(
                    Points::new(Self::month_points(trend, |r| r.month, |r| r.total_revenue))
                        .radius(3.0)
                        .color(REVENUE_COLOR),
                );
            });
    }

    /// Revenue, units and average price per month, one line each.
    pub fn draw_monthly_metrics(ui: &mut egui::Ui, monthly: &[MonthlyMetrics]) {
        let series: [(&str, fn(&MonthlyMetrics) -> f64); 3] = [
            ("Total Revenue", |m| m.total_revenue),
            ("Total Units Sold", |m| m.total_units_sold as f64),
            ("Average Price Per Unit", |m| m.average_price_per_unit),
        ];

        Plot::new("monthly_metrics")
            .height(280.0)
            .legend(Legend::default())
            .x_axis_label("Month")
            .y_axis_label("Value")
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| Self::month_label(mark.value))
            .show(ui, |plot_ui| {
                for (i, (name, value)) in series.iter().enumerate() {
                    let color = PALETTE[i % PALETTE.len()];
                    plot_ui.line(
                        Line::new(Self::month_points(monthly, |m| m.month, value))
                            .color(color)
                            .width(1.5)
                            .name(name),
                    );
                    plot_ui.points(
                        Points::new(Self::month_points(monthly, |m| m.month, value))
                            .radius(2.5)
                            .color(color),
                    );
                }
            });
    }

    /// Horizontal bars, highest revenue on top.
    pub fn draw_city_bars(ui: &mut egui::Ui, cities: &[CityMetrics]) {
        let n = cities.len();
        let labels: Vec<String> = cities.iter().rev().map(|c| c.city.clone()).collect();

        let bars: Vec<Bar> = cities
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new((n - 1 - i) as f64, c.total_revenue)
                    .name(format!("{}: {}", c.city, format_currency(c.total_revenue)))
                    .width(0.6)
            })
            .collect();

        Plot::new("city_revenue_bars")
            .height(240.0)
            .x_axis_label("Total Revenue")
            .y_axis_label("City")
            .allow_scroll(false)
            .allow_drag(false)
            .y_axis_formatter(move |mark, _range| {
                let v = mark.value;
                if v.fract() != 0.0 || v < 0.0 {
                    return String::new();
                }
                labels.get(v as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .horizontal()
                        .color(REVENUE_COLOR)
                        .name("Total Revenue"),
                );
            });
    }

    /// Cities placed by longitude/latitude, marker size following revenue.
    pub fn draw_city_map(ui: &mut egui::Ui, rows: &[GeoRow]) {
        Plot::new("city_revenue_map")
            .height(360.0)
            .data_aspect(1.0)
            .include_x(-180.0)
            .include_x(180.0)
            .include_y(-60.0)
            .include_y(80.0)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, row) in rows.iter().enumerate() {
                    let color = PALETTE[i % PALETTE.len()];
                    let radius = (row.marker_radius as f32).max(MIN_MARKER_RADIUS);
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter([[row.longitude, row.latitude]]))
                            .radius(radius)
                            .filled(true)
                            .color(color.gamma_multiply(0.7))
                            .name(format!("{}: {}", row.city, format_currency(row.total_revenue))),
                    );
                    plot_ui.text(Text::new(
                        PlotPoint::new(row.longitude, row.latitude - 4.0),
                        row.city.as_str(),
                    ));
                }
            });
    }
}
