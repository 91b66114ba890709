//! The zoomable sunburst panel.
//!
//! Draws every visible arc of the interpolated layout as a tessellated
//! annular-sector mesh, labels the arcs that pass the area threshold, and
//! maps pointer positions back to nodes in polar coordinates. Clicks go to
//! the zoom controller; while a transition is in flight the panel requests
//! a repaint every frame.

use std::f64::consts::FRAC_PI_2;
use std::f64::consts::TAU;

use eframe::egui;

use shopscope::data::Gender;
use shopscope::sunburst::zoom::{self, Hit};
use shopscope::sunburst::Interval;

use crate::ui::{draw_tooltip, format_money, gender_color, truncate_str};

use super::DashboardApp;

const CHART_SIDE: f32 = 600.0;
/// Arc tessellation step, radians per segment.
const ARC_STEP: f64 = 0.05;

impl DashboardApp {
    pub fn draw_sunburst(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let (Some(data), Some(zoom_state)) = (&self.data, &mut self.zoom) else {
            return;
        };
        let tree = &data.tree;

        let (rect, response) =
            ui.allocate_exact_size(egui::Vec2::splat(CHART_SIDE), egui::Sense::click());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        // Ring band [1, 3] fills the half-side, like the reference radius/6.
        let ring_unit = CHART_SIDE / 6.0;

        let now = ui.input(|i| i.time);
        if zoom_state.tick(now) {
            ctx.request_repaint();
        }

        // Arcs, root excluded (the center is the zoom-out control).
        for id in tree.ids().skip(1) {
            let iv = zoom_state.current(id);
            if !zoom::arc_visible(&iv) {
                continue;
            }
            let node = tree.node(id);
            let fill =
                arc_fill(tree, id, !node.children.is_empty()).unwrap_or(egui::Color32::GRAY);
            paint_arc(&painter, center, ring_unit, &iv, fill);
        }

        // Labels on top of the arcs.
        for id in tree.ids().skip(1) {
            let iv = zoom_state.current(id);
            if !zoom::label_visible(&iv) {
                continue;
            }
            paint_arc_label(&painter, center, ring_unit, &iv, &tree.node(id).name);
        }

        // Center control.
        painter.circle_stroke(
            center,
            ring_unit,
            egui::Stroke::new(1.0, egui::Color32::from_gray(200)),
        );
        if zoom_state.focus() != shopscope::aggregate::ROOT {
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                truncate_str(&tree.node(zoom_state.focus()).name, 14),
                egui::FontId::proportional(13.0),
                ui.visuals().text_color(),
            );
        }

        // Pointer → polar hit, one dispatch per element role.
        let hit = response.hover_pos().and_then(|pos| {
            let v = pos - center;
            let dist = v.length() as f64;
            if dist > 3.0 * ring_unit as f64 {
                return None;
            }
            let ring = dist / ring_unit as f64;
            let mut angle = (v.y as f64).atan2(v.x as f64) + FRAC_PI_2;
            if angle < 0.0 {
                angle += TAU;
            }
            zoom_state.hit_test(angle, ring)
        });

        match hit {
            Some(Hit::Arc(id)) => {
                ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
                if let Some(pos) = response.hover_pos() {
                    draw_tooltip(
                        &painter,
                        rect,
                        pos,
                        &[
                            tree.path_label(id),
                            format!("Value: {}", format_money(tree.node(id).value)),
                        ],
                    );
                }
                if response.clicked() {
                    zoom_state.focus_on(tree, id, now);
                    ctx.request_repaint();
                }
            }
            Some(Hit::Center) => {
                ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
                if response.clicked() {
                    zoom_state.zoom_out(tree, now);
                    ctx.request_repaint();
                }
            }
            None => {}
        }
    }

}

/// Fill color keyed by the depth-1 (gender) ancestor; interior arcs are
/// more opaque than leaves, as in the reference palette.
fn arc_fill(
    tree: &shopscope::aggregate::AggTree,
    id: usize,
    interior: bool,
) -> Option<egui::Color32> {
    let top = tree.top_ancestor(id)?;
    let gender = Gender::parse(&tree.node(top).name)?;
    let base = gender_color(gender);
    let alpha = if interior { 178 } else { 128 };
    Some(egui::Color32::from_rgba_unmultiplied(
        base.r(),
        base.g(),
        base.b(),
        alpha,
    ))
}

/// Screen angle for a partition angle: 0 points up, increasing clockwise.
fn screen_angle(x: f64) -> f32 {
    (x - FRAC_PI_2) as f32
}

fn polar(center: egui::Pos2, angle: f32, radius: f32) -> egui::Pos2 {
    center + egui::vec2(angle.cos() * radius, angle.sin() * radius)
}

/// Tessellate an annular sector into a triangle mesh plus a white outline.
fn paint_arc(
    painter: &egui::Painter,
    center: egui::Pos2,
    ring_unit: f32,
    iv: &Interval,
    fill: egui::Color32,
) {
    let r0 = (iv.y0 * ring_unit as f64) as f32;
    // 1 px gap between rings, as in the reference outerRadius.
    let r1 = ((iv.y1 * ring_unit as f64) as f32 - 1.0).max(r0);
    let a0 = screen_angle(iv.x0);
    let a1 = screen_angle(iv.x1);
    let steps = ((iv.angular_width() / ARC_STEP).ceil() as usize).max(2);

    let mut vertices = Vec::with_capacity((steps + 1) * 2);
    let mut indices = Vec::with_capacity(steps * 6);
    let mut inner_pts = Vec::with_capacity(steps + 1);
    let mut outer_pts = Vec::with_capacity(steps + 1);

    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let angle = a0 + (a1 - a0) * t;
        let inner = polar(center, angle, r0);
        let outer = polar(center, angle, r1);
        inner_pts.push(inner);
        outer_pts.push(outer);
        vertices.push(egui::epaint::Vertex {
            pos: inner,
            uv: egui::epaint::WHITE_UV,
            color: fill,
        });
        vertices.push(egui::epaint::Vertex {
            pos: outer,
            uv: egui::epaint::WHITE_UV,
            color: fill,
        });
    }
    for i in 0..steps as u32 {
        let base = i * 2;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 3, base + 2]);
    }

    painter.add(egui::Shape::mesh(egui::Mesh {
        indices,
        vertices,
        texture_id: egui::TextureId::default(),
    }));

    // White separator outline.
    let stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    painter.add(egui::Shape::line(outer_pts, stroke));
    painter.add(egui::Shape::line(inner_pts.clone(), stroke));
    if let (Some(&first_in), Some(&last_in)) = (inner_pts.first(), inner_pts.last()) {
        painter.line_segment([first_in, polar(center, a0, r1)], stroke);
        painter.line_segment([last_in, polar(center, a1, r1)], stroke);
    }
}

/// Label along the arc midline, flipped on the left half for readability.
fn paint_arc_label(
    painter: &egui::Painter,
    center: egui::Pos2,
    ring_unit: f32,
    iv: &Interval,
    name: &str,
) {
    let mid_x = (iv.x0 + iv.x1) / 2.0;
    let mid_radius = ((iv.y0 + iv.y1) / 2.0 * ring_unit as f64) as f32;
    let anchor = polar(center, screen_angle(mid_x), mid_radius);

    let mut angle = screen_angle(mid_x);
    if mid_x >= std::f64::consts::PI {
        angle += std::f32::consts::PI;
    }

    let galley = painter.layout_no_wrap(
        truncate_str(name, 14),
        egui::FontId::proportional(10.0),
        egui::Color32::from_gray(30),
    );
    let half = galley.size() / 2.0;
    // Anchor is the text center; TextShape rotates about its top-left.
    let offset = egui::vec2(
        -half.x * angle.cos() + half.y * angle.sin(),
        -half.x * angle.sin() - half.y * angle.cos(),
    );
    painter.add(
        egui::epaint::TextShape::new(anchor + offset, galley, egui::Color32::from_gray(30))
            .with_angle(angle),
    );
}
