//! Core domain types and logic: indicators, panel layout, chart assembly.

pub mod ohlcv;
pub mod indicator;
pub mod engine;
pub mod layout;
pub mod chart_spec;
pub mod chart_request;
pub mod config_validation;
pub mod error;
