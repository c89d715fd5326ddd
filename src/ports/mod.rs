//! Port traits at the I/O seams of the chart pipeline.

pub mod chart_port;
pub mod config_port;
pub mod data_port;
