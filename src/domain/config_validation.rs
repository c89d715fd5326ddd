//! Configuration validation.
//!
//! Validates the chart config fields before any data is read.

use crate::domain::chart_request::{normalize_ticker, validate_ndays, DEFAULT_NDAYS};
use crate::domain::chart_spec::ChartStyle;
use crate::domain::error::ChartError;
use crate::ports::config_port::ConfigPort;

pub fn validate_chart_config(config: &dyn ConfigPort) -> Result<(), ChartError> {
    validate_code(config)?;
    validate_window(config)?;
    validate_style(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), ChartError> {
    match config.get_string("data", "dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        Some(_) => Err(ChartError::ConfigInvalid {
            section: "data".to_string(),
            key: "dir".to_string(),
            reason: "dir must not be empty".to_string(),
        }),
        None => Err(ChartError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        }),
    }
}

fn validate_code(config: &dyn ConfigPort) -> Result<(), ChartError> {
    match config.get_string("chart", "code") {
        Some(code) => normalize_ticker(&code)
            .map(|_| ())
            .map_err(|e| ChartError::ConfigInvalid {
                section: "chart".to_string(),
                key: "code".to_string(),
                reason: e.to_string(),
            }),
        None => Ok(()),
    }
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), ChartError> {
    let invalid = |reason: String| ChartError::ConfigInvalid {
        section: "chart".to_string(),
        key: "ndays".to_string(),
        reason,
    };

    let ndays = match config.get_string("chart", "ndays") {
        None => DEFAULT_NDAYS as i64,
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid("ndays must be an integer".to_string()))?,
    };
    let ndays =
        usize::try_from(ndays).map_err(|_| invalid("ndays must be positive".to_string()))?;

    validate_ndays(ndays)
        .map(|_| ())
        .map_err(|e| invalid(e.to_string()))
}

fn validate_style(config: &dyn ConfigPort) -> Result<(), ChartError> {
    match config.get_string("chart", "style") {
        Some(name) => name
            .parse::<ChartStyle>()
            .map(|_| ())
            .map_err(|e| ChartError::ConfigInvalid {
                section: "chart".to_string(),
                key: "style".to_string(),
                reason: e.to_string(),
            }),
        None => Ok(()),
    }
}
