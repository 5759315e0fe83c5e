//! Sales Dashboard Main Application
//! Main window with control panel and dashboard view.

use crate::gui::{ControlPanel, ControlPanelAction, DashboardView};
use egui::SidePanel;
use sales_dashboard::config::AppConfig;
use sales_dashboard::data::{Dataset, DatasetCache, FilterSelection, LoadOptions};
use sales_dashboard::geo::Gazetteer;
use sales_dashboard::stats::DashboardSnapshot;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

/// CSV loading result from background thread
enum LoadResult {
    Complete(Arc<Dataset>),
    Error(String),
}

/// Main application window.
pub struct SalesDashboardApp {
    config: AppConfig,
    gazetteer: Gazetteer,
    control_panel: ControlPanel,
    dashboard_view: DashboardView,
    dataset: Option<Arc<Dataset>>,
    snapshot: Option<DashboardSnapshot>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl SalesDashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            config,
            gazetteer: Gazetteer::builtin(),
            control_panel: ControlPanel::new(),
            dashboard_view: DashboardView::new(),
            dataset: None,
            snapshot: None,
            load_rx: None,
            is_loading: false,
        };
        let options = app.config.load_options();
        app.start_load(options);
        app
    }

    /// Load through the process-wide cache on a background thread.
    fn start_load(&mut self, options: LoadOptions) {
        if self.is_loading {
            return;
        }

        self.control_panel.csv_path = Some(options.path.clone());
        self.control_panel.set_status("Loading CSV file...", false);
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match DatasetCache::global().get_or_load(&options) {
                Ok(dataset) => LoadResult::Complete(dataset),
                Err(e) => {
                    error!(path = %options.path.display(), "load failed: {e}");
                    LoadResult::Error(e.to_string())
                }
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(dataset)) => {
                let selection = FilterSelection::initial(&dataset);
                let options = dataset.products_in_years(selection.years);
                self.control_panel
                    .reset_filters(dataset.year_bounds(), selection, options);
                self.control_panel
                    .set_status(&format!("Loaded {} rows", dataset.len()), false);
                info!(rows = dataset.len(), "dataset ready");
                self.dataset = Some(dataset);
                self.is_loading = false;
                self.recompute();
            }
            Ok(LoadResult::Error(message)) => {
                self.control_panel
                    .set_status(&format!("Error: {message}"), true);
                self.dataset = None;
                self.snapshot = None;
                self.is_loading = false;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel
                    .set_status("Error: loader stopped unexpectedly", true);
                self.is_loading = false;
            }
        }
    }

    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.config.data_path = path;
            let options = self.config.load_options();
            self.start_load(options);
        }
    }

    /// Refresh product options and recompute every table for the current filters.
    fn recompute(&mut self) {
        let Some(dataset) = self.dataset.as_ref() else {
            return;
        };

        let selection = &self.control_panel.selection;
        self.control_panel.product_options = dataset.products_in_years(selection.years);
        let snapshot = DashboardSnapshot::compute(dataset, selection, &self.gazetteer);
        self.control_panel.set_status(
            &format!(
                "{} of {} rows selected",
                snapshot.filtered_rows,
                dataset.len()
            ),
            false,
        );
        self.snapshot = Some(snapshot);
    }
}

impl eframe::App for SalesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::FiltersChanged => self.recompute(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard_view.show(ui, self.snapshot.as_ref());
        });
    }
}
