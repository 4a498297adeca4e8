//! Domain error types.

/// Top-level error type for omxtrader.
#[derive(Debug, thiserror::Error)]
pub enum OmxtraderError {
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

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("unsupported timeframe: {value} (expected daily, weekly or monthly)")]
    UnsupportedTimeframe { value: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&OmxtraderError> for std::process::ExitCode {
    fn from(err: &OmxtraderError) -> Self {
        let code: u8 = match err {
            OmxtraderError::Io(_) => 1,
            OmxtraderError::ConfigParse { .. }
            | OmxtraderError::ConfigMissing { .. }
            | OmxtraderError::ConfigInvalid { .. } => 2,
            OmxtraderError::Data { .. } => 3,
            OmxtraderError::UnsupportedTimeframe { .. } => 4,
            OmxtraderError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
