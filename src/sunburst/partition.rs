//! Radial partition layout: aggregate tree → angular/radial intervals.
//!
//! Pure geometry. No I/O, no animation; given the same tree the result is
//! identical every time. Intervals are in normalized units — angles in
//! radians over [0, 2π), radii as depth bands [d, d+1) — and are scaled to
//! pixels by the view.

use std::f64::consts::TAU;

use crate::aggregate::{AggTree, ROOT};

/// A node's angular (circumferential) and radial (depth-band) extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Interval {
    pub const ZERO: Interval = Interval {
        x0: 0.0,
        x1: 0.0,
        y0: 0.0,
        y1: 0.0,
    };

    pub fn angular_width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Component-wise linear interpolation.
    pub fn lerp(from: Interval, to: Interval, t: f64) -> Interval {
        Interval {
            x0: from.x0 + (to.x0 - from.x0) * t,
            x1: from.x1 + (to.x1 - from.x1) * t,
            y0: from.y0 + (to.y0 - from.y0) * t,
            y1: from.y1 + (to.y1 - from.y1) * t,
        }
    }
}

/// Lay out the whole tree. Indexed by node id; the root spans the full
/// circle. Each parent's span is tiled by its children (already in
/// descending-value order) proportionally to value.
pub fn layout(tree: &AggTree) -> Vec<Interval> {
    let mut intervals = vec![Interval::ZERO; tree.len()];
    intervals[ROOT] = Interval {
        x0: 0.0,
        x1: TAU,
        y0: 0.0,
        y1: 1.0,
    };

    // Parents precede children in id order, so one forward pass suffices.
    for id in tree.ids() {
        let node = tree.node(id);
        if node.children.is_empty() {
            continue;
        }
        let span = intervals[id];
        let depth = node.depth as f64;
        let mut cursor = span.x0;
        for &child in &node.children {
            let fraction = if node.value > 0.0 {
                tree.node(child).value / node.value
            } else {
                0.0
            };
            let width = span.angular_width() * fraction;
            intervals[child] = Interval {
                x0: cursor,
                x1: cursor + width,
                y0: depth + 1.0,
                y1: depth + 2.0,
            };
            cursor += width;
        }
    }

    intervals
}
