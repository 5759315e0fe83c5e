//! Control Panel Widget
//! Left side panel with the data source and the year / product filters.

use egui::{Color32, RichText, ScrollArea};
use sales_dashboard::data::{FilterSelection, ProductSet, YearRange};
use std::path::PathBuf;

/// Left side control panel with file selection and filter controls.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub year_bounds: Option<YearRange>,
    pub selection: FilterSelection,
    pub product_options: Vec<String>,
    pub status: String,
    pub is_error: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            year_bounds: None,
            selection: FilterSelection {
                years: YearRange::new(0, 0),
                products: ProductSet::new(),
            },
            product_options: Vec::new(),
            status: "Ready".to_string(),
            is_error: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset filters for a freshly loaded dataset.
    pub fn reset_filters(
        &mut self,
        year_bounds: Option<YearRange>,
        selection: FilterSelection,
        product_options: Vec<String>,
    ) {
        self.year_bounds = year_bounds;
        self.selection = selection;
        self.product_options = product_options;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Sales Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());
                    ui.label(RichText::new(&path_text).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Year Range Section =====
        ui.label(RichText::new("📅 Year Range").size(14.0).strong());
        ui.add_space(5.0);

        if let Some(bounds) = self.year_bounds {
            if self.show_year_sliders(ui, bounds) {
                action = ControlPanelAction::FiltersChanged;
            }
        } else {
            ui.label(RichText::new("No data loaded").color(Color32::GRAY));
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Product Section =====
        ui.label(RichText::new("🏷 Products").size(14.0).strong());
        ui.add_space(5.0);

        if self.show_product_list(ui) {
            action = ControlPanelAction::FiltersChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// The two sliders never cross.
    fn show_year_sliders(&mut self, ui: &mut egui::Ui, bounds: YearRange) -> bool {
        let years = &mut self.selection.years;
        let from_changed = ui
            .add(egui::Slider::new(&mut years.from, bounds.from..=bounds.to).text("From"))
            .changed();
        if from_changed && years.from > years.to {
            years.to = years.from;
        }

        let to_changed = ui
            .add(egui::Slider::new(&mut years.to, bounds.from..=bounds.to).text("To"))
            .changed();
        if to_changed && years.to < years.from {
            years.from = years.to;
        }

        from_changed || to_changed
    }

    fn show_product_list(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    for product in &self.product_options {
                        let mut checked = self.selection.products.contains(product);
                        if ui.checkbox(&mut checked, product).changed() {
                            if checked {
                                self.selection.products.insert(product.clone());
                            } else {
                                self.selection.products.remove(product);
                            }
                            changed = true;
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selection
                    .products
                    .extend(self.product_options.iter().cloned());
                changed = true;
            }
            if ui.small_button("Clear All").clicked() {
                self.selection.products.clear();
                changed = true;
            }
        });

        changed
    }

    /// Set status text
    pub fn set_status(&mut self, status: &str, is_error: bool) {
        self.status = status.to_string();
        self.is_error = is_error;
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    FiltersChanged,
}
