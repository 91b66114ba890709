//! The zoom/focus state machine.
//!
//! One focus node at a time. A click re-targets every node's interval
//! relative to the new focus and starts a 750 ms linear interpolation from
//! whatever is currently on screen, so a click mid-flight supersedes the
//! old transition without any visual jump. Animation state lives here, in
//! vectors keyed by node id — the domain tree is never touched.

use std::f64::consts::TAU;

use crate::aggregate::{AggTree, ROOT};
use crate::sunburst::partition::{self, Interval};

/// Transition duration in seconds.
pub const TRANSITION_SECS: f64 = 0.75;

/// Arcs are drawn inside the ring band [1, 3]; anything outside, or with a
/// zero angular width, is invisible.
pub fn arc_visible(iv: &Interval) -> bool {
    iv.y1 <= 3.0 && iv.y0 >= 1.0 && iv.x1 > iv.x0
}

/// Labels additionally need enough angular × radial area to be readable.
pub fn label_visible(iv: &Interval) -> bool {
    arc_visible(iv) && (iv.y1 - iv.y0) * (iv.x1 - iv.x0) > 0.03
}

/// What a pointer position inside the sunburst resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A visible arc; clicking it zooms in.
    Arc(usize),
    /// The center control; clicking it zooms out one level.
    Center,
}

pub struct ZoomState {
    /// Pure partition layout; never mutated after construction.
    base: Vec<Interval>,
    /// What is presently rendered, advanced each frame.
    current: Vec<Interval>,
    /// Snapshot of `current` at the moment of the last focus change.
    from: Vec<Interval>,
    /// Where each interval is headed.
    target: Vec<Interval>,
    focus: usize,
    /// Start time (seconds) of the in-flight transition, if any.
    started_at: Option<f64>,
}

impl ZoomState {
    pub fn new(tree: &AggTree) -> ZoomState {
        let base = partition::layout(tree);
        ZoomState {
            current: base.clone(),
            from: base.clone(),
            target: base.clone(),
            base,
            focus: ROOT,
            started_at: None,
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn current(&self, id: usize) -> Interval {
        self.current[id]
    }

    pub fn target(&self, id: usize) -> Interval {
        self.target[id]
    }

    pub fn animating(&self) -> bool {
        self.started_at.is_some()
    }

    /// Make `node` the zoom root and start animating toward its view.
    ///
    /// Targets are re-normalized from the *base* layout against the focus's
    /// base interval: angles clamp-and-rescale into [0, 2π), radial bands
    /// shift down by the focus depth and floor at 0. Nodes outside the
    /// focus's subtree collapse to zero-width wedges but stay present so a
    /// later zoom-out re-expands them smoothly. The interpolation always
    /// starts from the live (possibly mid-flight) intervals.
    pub fn focus_on(&mut self, tree: &AggTree, node: usize, now: f64) {
        // Settle `current` to this instant before snapshotting it.
        self.tick(now);

        let focus_iv = self.base[node];
        let focus_depth = tree.node(node).depth as f64;
        let span = focus_iv.angular_width();

        for id in tree.ids() {
            let b = self.base[id];
            let (x0, x1) = if span > 0.0 {
                (
                    ((b.x0 - focus_iv.x0) / span).clamp(0.0, 1.0) * TAU,
                    ((b.x1 - focus_iv.x0) / span).clamp(0.0, 1.0) * TAU,
                )
            } else {
                (0.0, 0.0)
            };
            self.target[id] = Interval {
                x0,
                x1,
                y0: (b.y0 - focus_depth).max(0.0),
                y1: (b.y1 - focus_depth).max(0.0),
            };
        }

        self.from = self.current.clone();
        self.focus = node;
        self.started_at = Some(now);
    }

    /// Center-control click: focus the parent, or stay at the root.
    pub fn zoom_out(&mut self, tree: &AggTree, now: f64) {
        let parent = tree.node(self.focus).parent.unwrap_or(ROOT);
        self.focus_on(tree, parent, now);
    }

    /// Advance the interpolation to time `now`. Returns true while a
    /// transition is still in flight (the caller should request another
    /// frame).
    pub fn tick(&mut self, now: f64) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        let t = ((now - started_at) / TRANSITION_SECS).clamp(0.0, 1.0);
        if t >= 1.0 {
            // Land exactly on the target; no residual float drift.
            self.current.copy_from_slice(&self.target);
            self.started_at = None;
            return false;
        }
        for id in 0..self.current.len() {
            self.current[id] = Interval::lerp(self.from[id], self.target[id], t);
        }
        true
    }

    /// Resolve a polar position (angle in [0, 2π), ring in normalized radial
    /// units) against the interpolated state. Zero-width wedges can never
    /// match, so collapsed nodes are unreachable by construction.
    pub fn hit_test(&self, angle: f64, ring: f64) -> Option<Hit> {
        if ring < 1.0 {
            return Some(Hit::Center);
        }
        for id in 1..self.current.len() {
            let iv = self.current[id];
            if arc_visible(&iv)
                && angle >= iv.x0
                && angle < iv.x1
                && ring >= iv.y0
                && ring < iv.y1
            {
                return Some(Hit::Arc(id));
            }
        }
        None
    }
}
