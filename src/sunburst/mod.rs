//! The zoomable sunburst core: radial partition layout and the focus/zoom
//! state machine that animates between layouts.

pub mod partition;
pub mod zoom;

pub use partition::{layout, Interval};
pub use zoom::ZoomState;
