//! Background dataset load for `DashboardApp`.
//!
//! The CSV is read and aggregated on a worker thread; the result comes back
//! over an mpsc channel polled once per frame (`check_load`). The session
//! loads exactly once — there is no reload control and no other I/O.

use std::path::Path;
use std::sync::mpsc;

use eframe::egui;

use shopscope::engine::DashboardEngine;
use shopscope::sunburst::ZoomState;

use super::DashboardApp;

/// The dataset ships alongside the binary; no CLI, no environment variables.
const DATA_FILE: &str = "customer_shopping_data.csv";

impl DashboardApp {
    /// Kick off the one-time dataset load.
    pub fn begin_load(&mut self, ctx: &egui::Context) {
        self.load_started = true;
        self.loading = true;
        self.error = None;

        let (tx, rx) = mpsc::channel();
        self.load_rx = Some(rx);

        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let engine = DashboardEngine::new();
            let result = engine.load(Path::new(DATA_FILE));
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Poll the load channel; on success build the sunburst zoom state.
    pub fn check_load(&mut self) {
        let Some(rx) = &self.load_rx else {
            return;
        };
        if let Ok(result) = rx.try_recv() {
            self.load_rx = None;
            self.loading = false;
            match result {
                Ok(data) => {
                    log::info!(
                        "Dashboard ready: {} transactions, {} tree nodes",
                        data.summary.transactions,
                        data.tree.len()
                    );
                    self.zoom = Some(ZoomState::new(&data.tree));
                    self.monthly_cache = None;
                    self.data = Some(data);
                }
                Err(e) => {
                    log::error!("Dataset load failed: {}", e);
                    self.error = Some(e.to_string());
                }
            }
        }
    }
}
