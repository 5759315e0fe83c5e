//! Sales Dashboard - interactive sales reporting over a CSV export
//!
//! Desktop host for the `sales_dashboard` library: filters on the left,
//! metrics, tables and charts on the right.

mod charts;
mod gui;

use anyhow::Result;
use eframe::egui;
use gui::SalesDashboardApp;
use sales_dashboard::config::AppConfig;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = AppConfig::from_env();
    info!(path = %config.data_path.display(), encoding = %config.encoding, "startup");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Sales Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(SalesDashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("UI failed: {e}"))
}
