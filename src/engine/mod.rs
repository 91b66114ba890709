pub mod pipeline;

pub use pipeline::{DashboardData, DashboardEngine, LoadError};
