//! The simple derived-aggregate charts: gender bars, the age × category
//! heatmap, and the monthly trend line with its year filter. All are
//! painter-drawn from precomputed aggregates; only the trend series is
//! recomputed, and only when the year selection changes.

use eframe::egui;

use shopscope::aggregate::stats;
use shopscope::data::AgeBracket;

use crate::ui::{draw_tooltip, format_money, gender_color, heat_color, truncate_str, ACCENT, MONTHS};

use super::DashboardApp;

const BAR_CHART_SIZE: egui::Vec2 = egui::vec2(360.0, 240.0);
const HEATMAP_SIZE: egui::Vec2 = egui::vec2(420.0, 260.0);
const TREND_SIZE: egui::Vec2 = egui::vec2(860.0, 300.0);

impl DashboardApp {
    // ── Bar chart: revenue by gender ─────────────────────────────────────────

    pub fn draw_gender_chart(&mut self, ui: &mut egui::Ui) {
        let Some(data) = &self.data else {
            return;
        };

        let (rect, response) = ui.allocate_exact_size(BAR_CHART_SIZE, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let plot = rect.shrink2(egui::vec2(50.0, 24.0));

        let max = data
            .gender_revenue
            .iter()
            .map(|(_, v)| *v)
            .fold(0.0, f64::max)
            .max(1.0);

        draw_y_axis(&painter, plot, max, ui.visuals().text_color());

        let n = data.gender_revenue.len().max(1);
        let band = plot.width() / n as f32;
        let bar_width = band * 0.5;
        let pointer = response.hover_pos();
        let mut tooltip: Option<(egui::Pos2, Vec<String>)> = None;

        for (i, (gender, value)) in data.gender_revenue.iter().enumerate() {
            let height = (value / max) as f32 * plot.height();
            let x = plot.left() + band * i as f32 + (band - bar_width) / 2.0;
            let bar = egui::Rect::from_min_max(
                egui::pos2(x, plot.bottom() - height),
                egui::pos2(x + bar_width, plot.bottom()),
            );
            painter.rect_filled(bar, 2.0, gender_color(*gender));
            painter.text(
                egui::pos2(x + bar_width / 2.0, plot.bottom() + 4.0),
                egui::Align2::CENTER_TOP,
                gender.label(),
                egui::FontId::proportional(12.0),
                ui.visuals().text_color(),
            );

            if let Some(pos) = pointer {
                if bar.contains(pos) {
                    tooltip = Some((
                        pos,
                        vec![
                            gender.label().to_string(),
                            format!("Sales: {}", format_money(*value)),
                        ],
                    ));
                }
            }
        }

        if let Some((pos, lines)) = tooltip {
            draw_tooltip(&painter, rect, pos, &lines);
        }
    }

    // ── Heatmap: age bracket × category ──────────────────────────────────────

    pub fn draw_heatmap(&mut self, ui: &mut egui::Ui) {
        let Some(data) = &self.data else {
            return;
        };
        let grid = &data.heatmap;
        if grid.categories.is_empty() {
            ui.label("No data");
            return;
        }

        let (rect, response) = ui.allocate_exact_size(HEATMAP_SIZE, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let plot = egui::Rect::from_min_max(
            rect.min + egui::vec2(90.0, 8.0),
            rect.max - egui::vec2(8.0, 24.0),
        );

        let cols = AgeBracket::ALL.len();
        let rows = grid.categories.len();
        let cell_w = plot.width() / cols as f32;
        let cell_h = plot.height() / rows as f32;
        let pointer = response.hover_pos();
        let mut tooltip: Option<(egui::Pos2, Vec<String>)> = None;

        for (bi, bracket) in AgeBracket::ALL.iter().enumerate() {
            for ci in 0..rows {
                let value = grid.cell(bi, ci);
                let cell = egui::Rect::from_min_size(
                    plot.min + egui::vec2(bi as f32 * cell_w, ci as f32 * cell_h),
                    egui::vec2(cell_w, cell_h),
                );
                let fill = if value > 0.0 && grid.max > 0.0 {
                    heat_color((value / grid.max) as f32)
                } else {
                    egui::Color32::from_rgb(0xf8, 0xf9, 0xfa)
                };
                painter.rect(cell.shrink(1.0), 0.0, fill, egui::Stroke::new(1.0, egui::Color32::WHITE));

                if let Some(pos) = pointer {
                    if cell.contains(pos) {
                        tooltip = Some((
                            pos,
                            vec![
                                format!("{} years", bracket.label()),
                                grid.categories[ci].clone(),
                                format!("Sales: {}", format_money(value)),
                            ],
                        ));
                    }
                }
            }
        }

        // Axis labels.
        for (bi, bracket) in AgeBracket::ALL.iter().enumerate() {
            painter.text(
                egui::pos2(plot.left() + (bi as f32 + 0.5) * cell_w, plot.bottom() + 4.0),
                egui::Align2::CENTER_TOP,
                bracket.label(),
                egui::FontId::proportional(11.0),
                ui.visuals().text_color(),
            );
        }
        for (ci, category) in grid.categories.iter().enumerate() {
            painter.text(
                egui::pos2(plot.left() - 4.0, plot.top() + (ci as f32 + 0.5) * cell_h),
                egui::Align2::RIGHT_CENTER,
                truncate_str(category, 14),
                egui::FontId::proportional(11.0),
                ui.visuals().text_color(),
            );
        }

        if let Some((pos, lines)) = tooltip {
            draw_tooltip(&painter, rect, pos, &lines);
        }
    }

    // ── Trend chart: monthly revenue with year filter ────────────────────────

    pub fn draw_trend_chart(&mut self, ui: &mut egui::Ui) {
        let Some(data) = &self.data else {
            return;
        };

        ui.horizontal(|ui| {
            ui.label("Year:");
            egui::ComboBox::from_id_salt("trend_year")
                .selected_text(match self.selected_year {
                    Some(year) => year.to_string(),
                    None => "All years".to_string(),
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.selected_year, None, "All years");
                    for &year in &data.years {
                        ui.selectable_value(&mut self.selected_year, Some(year), year.to_string());
                    }
                });
        });

        let year = self.selected_year;
        let stale = self.monthly_cache.map(|(y, _)| y) != Some(year);
        if stale {
            self.monthly_cache = Some((year, stats::monthly_revenue(&data.records, year)));
        }
        let months = self.monthly_cache.as_ref().map(|(_, m)| *m).unwrap_or([0.0; 12]);

        let (rect, response) = ui.allocate_exact_size(TREND_SIZE, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let plot = rect.shrink2(egui::vec2(60.0, 28.0));

        let max = months.iter().copied().fold(0.0, f64::max).max(1.0);
        draw_y_axis(&painter, plot, max, ui.visuals().text_color());

        let band = plot.width() / 12.0;
        let point = |i: usize| -> egui::Pos2 {
            egui::pos2(
                plot.left() + (i as f32 + 0.5) * band,
                plot.bottom() - (months[i] / max) as f32 * plot.height(),
            )
        };

        // Translucent area under the line.
        let area_fill = egui::Color32::from_rgba_unmultiplied(ACCENT.r(), ACCENT.g(), ACCENT.b(), 60);
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(66);
        for i in 0..12 {
            let top = point(i);
            vertices.push(egui::epaint::Vertex {
                pos: top,
                uv: egui::epaint::WHITE_UV,
                color: area_fill,
            });
            vertices.push(egui::epaint::Vertex {
                pos: egui::pos2(top.x, plot.bottom()),
                uv: egui::epaint::WHITE_UV,
                color: area_fill,
            });
        }
        for i in 0..11u32 {
            let base = i * 2;
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 3, base + 2]);
        }
        painter.add(egui::Shape::mesh(egui::Mesh {
            indices,
            vertices,
            texture_id: egui::TextureId::default(),
        }));

        // Line and dots.
        let line: Vec<egui::Pos2> = (0..12).map(point).collect();
        painter.add(egui::Shape::line(line, egui::Stroke::new(3.0, ACCENT)));

        let pointer = response.hover_pos();
        let mut tooltip: Option<(egui::Pos2, Vec<String>)> = None;
        for (i, month) in MONTHS.iter().enumerate() {
            let p = point(i);
            painter.circle_filled(p, 5.0, ACCENT);
            painter.circle_stroke(p, 5.0, egui::Stroke::new(2.0, egui::Color32::WHITE));
            painter.text(
                egui::pos2(p.x, plot.bottom() + 6.0),
                egui::Align2::CENTER_TOP,
                *month,
                egui::FontId::proportional(11.0),
                ui.visuals().text_color(),
            );

            if let Some(pos) = pointer {
                if pos.distance(p) <= 8.0 {
                    tooltip = Some((
                        pos,
                        vec![
                            (*month).to_string(),
                            format!("Sales: {}", format_money(months[i])),
                        ],
                    ));
                }
            }
        }

        if let Some((pos, lines)) = tooltip {
            draw_tooltip(&painter, rect, pos, &lines);
        }
    }
}

/// Baseline, left axis, and four "$NK" ticks.
fn draw_y_axis(painter: &egui::Painter, plot: egui::Rect, max: f64, text_color: egui::Color32) {
    let axis = egui::Stroke::new(1.0, egui::Color32::from_gray(160));
    painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis);
    painter.line_segment([plot.left_top(), plot.left_bottom()], axis);

    for i in 0..=4 {
        let fraction = i as f32 / 4.0;
        let y = plot.bottom() - fraction * plot.height();
        let value = max * fraction as f64;
        let label = if value >= 1000.0 {
            format!("${:.0}K", value / 1000.0)
        } else {
            format!("${:.0}", value)
        };
        painter.text(
            egui::pos2(plot.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            label,
            egui::FontId::proportional(10.0),
            text_color,
        );
        if i > 0 {
            painter.line_segment(
                [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
                egui::Stroke::new(0.5, egui::Color32::from_gray(220)),
            );
        }
    }
}
