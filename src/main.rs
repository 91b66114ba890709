use eframe::egui;

mod app;
mod ui;

use app::DashboardApp;

fn main() {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ShopScope — Retail Analytics",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::default()))),
    )
    .expect("Failed to start ShopScope");
}
