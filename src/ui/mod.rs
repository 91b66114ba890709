//! Shared UI helpers: the color palette, number formatting, and the floating
//! tooltip painted next to the pointer. Stateless; used by every panel.

use eframe::egui;

// ─── Palette ─────────────────────────────────────────────────────────────────

/// Accent color used for the trend line and highlights.
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x66, 0x7e, 0xea);

pub fn gender_color(gender: shopscope::data::Gender) -> egui::Color32 {
    match gender {
        shopscope::data::Gender::Male => egui::Color32::from_rgb(0x66, 0x7e, 0xea),
        shopscope::data::Gender::Female => egui::Color32::from_rgb(0x76, 0x4b, 0xa2),
    }
}

/// Sequential white → blue ramp for heatmap cells, `t` in [0, 1].
pub fn heat_color(t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: f32, b: f32| (a + (b - a) * t) as u8;
    egui::Color32::from_rgb(lerp(247.0, 8.0), lerp(251.0, 48.0), lerp(255.0, 107.0))
}

// ─── Formatting ──────────────────────────────────────────────────────────────

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Group an unsigned integer with thousands separators.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// "$1,234" — whole-dollar amount with separators.
pub fn format_money(value: f64) -> String {
    format!("${}", format_count(value.round().max(0.0) as u64))
}

/// "$12.34" — cent-precision amount (average purchase).
pub fn format_money_exact(value: f64) -> String {
    format!("${:.2}", value)
}

pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", t)
    }
}

// ─── Tooltip ─────────────────────────────────────────────────────────────────

/// Paint a small floating tooltip near `at`, kept inside `clip`.
pub fn draw_tooltip(painter: &egui::Painter, clip: egui::Rect, at: egui::Pos2, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    let font = egui::FontId::proportional(12.0);
    let galleys: Vec<_> = lines
        .iter()
        .map(|l| painter.layout_no_wrap(l.clone(), font.clone(), egui::Color32::WHITE))
        .collect();

    let pad = 6.0;
    let width = galleys.iter().map(|g| g.size().x).fold(0.0, f32::max) + pad * 2.0;
    let height: f32 = galleys.iter().map(|g| g.size().y).sum::<f32>() + pad * 2.0;

    let mut pos = at + egui::vec2(12.0, -height - 8.0);
    pos.x = pos.x.min(clip.right() - width).max(clip.left());
    pos.y = pos.y.max(clip.top());

    let rect = egui::Rect::from_min_size(pos, egui::vec2(width, height));
    painter.rect_filled(
        rect,
        4.0,
        egui::Color32::from_rgba_unmultiplied(20, 20, 30, 230),
    );

    let mut cursor = pos + egui::vec2(pad, pad);
    for galley in galleys {
        let size = galley.size();
        painter.galley(cursor, galley, egui::Color32::WHITE);
        cursor.y += size.y;
    }
}
