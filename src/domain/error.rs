//! Domain error types.

/// Top-level error type for stockchart.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("data unavailable for {code}: {reason}")]
    DataUnavailable { code: String, reason: String },

    #[error("no data for {code}")]
    NoData { code: String },

    #[error("invalid ticker {input:?}: empty after trimming")]
    InvalidTicker { input: String },

    #[error("invalid window of {ndays} days: must be between {min} and {max}")]
    InvalidWindow { ndays: usize, min: usize, max: usize },

    #[error("unknown chart style {name:?}")]
    UnknownStyle { name: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ChartError> for std::process::ExitCode {
    fn from(err: &ChartError) -> Self {
        let code: u8 = match err {
            ChartError::Io(_) | ChartError::Serialize(_) => 1,
            ChartError::ConfigParse { .. }
            | ChartError::ConfigMissing { .. }
            | ChartError::ConfigInvalid { .. }
            | ChartError::InvalidTicker { .. }
            | ChartError::InvalidWindow { .. }
            | ChartError::UnknownStyle { .. } => 2,
            ChartError::DataUnavailable { .. } | ChartError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
