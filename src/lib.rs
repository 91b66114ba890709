pub mod data;
pub mod aggregate;
pub mod sunburst;
pub mod engine;
