//! Header strip: the four stat cards, the skipped-row notice, and the
//! dark-mode toggle.

use eframe::egui;

use crate::ui::{format_count, format_money, format_money_exact};

use super::DashboardApp;

impl DashboardApp {
    pub fn draw_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("ShopScope");
            ui.separator();

            if let Some(ref data) = self.data {
                let summary = &data.summary;

                stat_card(ui, "Transactions", &format_count(summary.transactions as u64));
                stat_card(ui, "Total Revenue", &format_money(summary.total_revenue));
                stat_card(
                    ui,
                    "Avg Purchase",
                    &summary
                        .average_purchase
                        .map(format_money_exact)
                        .unwrap_or_else(|| "no data".to_string()),
                );
                stat_card(
                    ui,
                    "Top Category",
                    summary.top_category.as_deref().unwrap_or("no data"),
                );

                if data.report.rows_skipped() > 0 {
                    ui.colored_label(
                        egui::Color32::from_rgb(255, 160, 0),
                        format!(
                            "⚠ {} of {} rows skipped (unparseable fields)",
                            data.report.rows_skipped(),
                            data.report.rows_total
                        ),
                    );
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.checkbox(&mut self.dark_mode, "Dark");
            });
        });
    }
}

fn stat_card(ui: &mut egui::Ui, caption: &str, value: &str) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(caption).small().weak());
            ui.label(egui::RichText::new(value).size(16.0).strong());
        });
    });
}
