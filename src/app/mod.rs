//! `DashboardApp` — the top-level egui application state.
//!
//! This module declares the `DashboardApp` struct and its `Default` impl.
//! All methods are split across the sibling sub-modules:
//!
//! - `load`          — background dataset load over an mpsc channel
//! - `header`        — stat cards and the skipped-row notice
//! - `sunburst_view` — the zoomable drill-down chart
//! - `charts`        — gender bars, heatmap, monthly trend

pub mod load;
pub mod header;
pub mod sunburst_view;
pub mod charts;

use std::sync::mpsc;

use eframe::egui;

use shopscope::engine::{DashboardData, LoadError};
use shopscope::sunburst::ZoomState;

// ─── Application state ───────────────────────────────────────────────────────

pub struct DashboardApp {
    pub data: Option<DashboardData>,
    pub error: Option<String>,
    pub loading: bool,
    pub load_started: bool,
    pub load_rx: Option<mpsc::Receiver<Result<DashboardData, LoadError>>>,
    /// Animation/focus state for the sunburst, rebuilt with each dataset.
    pub zoom: Option<ZoomState>,
    /// Trend-chart year filter; None = all years.
    pub selected_year: Option<i32>,
    /// Cached monthly series for the selected year.
    pub monthly_cache: Option<(Option<i32>, [f64; 12])>,
    pub dark_mode: bool,
}

impl Default for DashboardApp {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
            load_started: false,
            load_rx: None,
            zoom: None,
            selected_year: None,
            monthly_cache: None,
            dark_mode: false,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.load_started {
            self.begin_load(ctx);
        }
        self.check_load();

        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.draw_header(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_content(ui, ctx);
        });
    }
}

impl DashboardApp {
    /// Top-level dispatcher: spinner, fatal error, or the chart grid.
    fn draw_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.loading {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        }

        if let Some(ref error) = self.error {
            ui.centered_and_justified(|ui| {
                ui.colored_label(egui::Color32::RED, error);
            });
            return;
        }

        if self.data.is_none() {
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_top(|ui| {
                ui.vertical(|ui| {
                    ui.heading("Customer Demographics Drill-Down");
                    ui.label("Click a segment to zoom in, the center to zoom out.");
                    self.draw_sunburst(ui, ctx);
                });
                ui.separator();
                ui.vertical(|ui| {
                    ui.heading("Revenue by Gender");
                    self.draw_gender_chart(ui);
                    ui.add_space(16.0);
                    ui.heading("Revenue by Age & Category");
                    self.draw_heatmap(ui);
                });
            });
            ui.separator();
            ui.heading("Monthly Purchase Trends");
            self.draw_trend_chart(ui);
        });
    }
}
