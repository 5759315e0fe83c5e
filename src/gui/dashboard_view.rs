//! Dashboard View Widget
//! Central tabbed area: overview, product, monthly and city analysis.

use crate::charts::ChartPlotter;
use egui::{Color32, RichText, ScrollArea};
use sales_dashboard::format::{format_count, format_currency};
use sales_dashboard::stats::DashboardSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Home,
    Products,
    Monthly,
    Cities,
}

impl DashboardTab {
    const ALL: [DashboardTab; 4] = [
        DashboardTab::Home,
        DashboardTab::Products,
        DashboardTab::Monthly,
        DashboardTab::Cities,
    ];

    fn title(&self) -> &'static str {
        match self {
            DashboardTab::Home => "Home",
            DashboardTab::Products => "Product Analysis",
            DashboardTab::Monthly => "Monthly Analysis",
            DashboardTab::Cities => "City Analysis",
        }
    }
}

#[derive(Default)]
pub struct DashboardView {
    pub tab: DashboardTab,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, snapshot: Option<&DashboardSnapshot>) {
        let Some(snapshot) = snapshot else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ui.horizontal(|ui| {
            for tab in DashboardTab::ALL {
                ui.selectable_value(&mut self.tab, tab, RichText::new(tab.title()).size(15.0));
            }
        });
        ui.separator();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.tab {
                DashboardTab::Home => Self::show_home(ui, snapshot),
                DashboardTab::Products => Self::show_products(ui, snapshot),
                DashboardTab::Monthly => Self::show_monthly(ui, snapshot),
                DashboardTab::Cities => Self::show_cities(ui, snapshot),
            });
    }

    fn header(ui: &mut egui::Ui, text: &str) {
        ui.add_space(8.0);
        ui.label(RichText::new(text).size(20.0).strong());
        ui.add_space(8.0);
    }

    fn metric_card(ui: &mut egui::Ui, label: &str, value: String) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                ui.label(RichText::new(value).size(24.0).strong());
            });
    }

    fn header_row(ui: &mut egui::Ui, headers: &[&str]) {
        for h in headers {
            ui.label(RichText::new(*h).strong());
        }
        ui.end_row();
    }

    fn show_home(ui: &mut egui::Ui, snapshot: &DashboardSnapshot) {
        Self::header(ui, "Global Sales Overview");

        let global = &snapshot.global;
        ui.columns(3, |cols| {
            Self::metric_card(&mut cols[0], "Total Revenue", format_currency(global.total_revenue));
            Self::metric_card(&mut cols[1], "Total Units Sold", format_count(global.total_units));
            Self::metric_card(
                &mut cols[2],
                "Average Order Value",
                format_currency(global.average_order_value),
            );
        });

        ui.add_space(12.0);
        ui.label(RichText::new("Global Monthly Revenue Trend").size(14.0).strong());
        ChartPlotter::draw_revenue_trend(ui, &snapshot.trend);
    }

    fn show_products(ui: &mut egui::Ui, snapshot: &DashboardSnapshot) {
        Self::header(ui, "Product Analysis");

        egui::Grid::new("product_table")
            .striped(true)
            .min_col_width(90.0)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                Self::header_row(
                    ui,
                    &["Product", "Total Revenue", "Units Sold", "Avg Price / Unit", "Orders"],
                );
                for p in &snapshot.products {
                    ui.label(&p.product);
                    ui.label(format_currency(p.total_revenue));
                    ui.label(format_count(p.total_units_sold));
                    ui.label(format_currency(p.average_price_per_unit));
                    ui.label(format_count(p.total_orders as u64));
                    ui.end_row();
                }
            });
    }

    fn show_monthly(ui: &mut egui::Ui, snapshot: &DashboardSnapshot) {
        Self::header(ui, "Monthly Analysis");
        ChartPlotter::draw_monthly_metrics(ui, &snapshot.monthly);
        ui.add_space(10.0);

        egui::Grid::new("monthly_table")
            .striped(true)
            .min_col_width(90.0)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                Self::header_row(ui, &["Month", "Total Revenue", "Units Sold", "Avg Price / Unit"]);
                for m in &snapshot.monthly {
                    ui.label(m.month.to_string());
                    ui.label(format_currency(m.total_revenue));
                    ui.label(format_count(m.total_units_sold));
                    ui.label(format_currency(m.average_price_per_unit));
                    ui.end_row();
                }
            });
    }

    fn show_cities(ui: &mut egui::Ui, snapshot: &DashboardSnapshot) {
        Self::header(ui, "Top 5 Cities by Revenue");
        ChartPlotter::draw_city_bars(ui, &snapshot.cities);
        ui.add_space(10.0);

        egui::Grid::new("city_table")
            .striped(true)
            .min_col_width(90.0)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                Self::header_row(ui, &["City", "Total Revenue", "Units Sold"]);
                for c in &snapshot.cities {
                    ui.label(&c.city);
                    ui.label(format_currency(c.total_revenue));
                    ui.label(format_count(c.total_units_sold));
                    ui.end_row();
                }
            });

        ui.add_space(12.0);
        ui.label(RichText::new("Revenue Map").size(14.0).strong());
        ChartPlotter::draw_city_map(ui, &snapshot.geo);
    }
}
