//! Domain error types.

/// Top-level error type for quantlab.
#[derive(Debug, thiserror::Error)]
pub enum QuantlabError {
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

    #[error("unknown strategy '{name}' (known: {known})")]
    UnknownStrategy { name: String, known: String },

    #[error("short_window ({short_window}) must be less than long_window ({long_window}), both positive")]
    InvalidWindows {
        short_window: usize,
        long_window: usize,
    },

    #[error("empty price series")]
    EmptySeries,

    #[error("bar dates must be strictly ascending (violation at index {position})")]
    UnorderedDates { position: usize },

    #[error("non-finite {column} value at index {position}")]
    NonNumeric {
        column: &'static str,
        position: usize,
    },

    #[error("insufficient data: have {bars} bars, need {minimum}")]
    InsufficientData { bars: usize, minimum: usize },

    #[error("data load error: {reason}")]
    DataLoad { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl QuantlabError {
    /// Expected data-quality failures the backtest boundary converts into the
    /// zeroed fallback result instead of propagating.
    pub fn is_data_fault(&self) -> bool {
        matches!(
            self,
            QuantlabError::EmptySeries
                | QuantlabError::UnorderedDates { .. }
                | QuantlabError::NonNumeric { .. }
                | QuantlabError::InsufficientData { .. }
        )
    }
}

impl From<&QuantlabError> for std::process::ExitCode {
    fn from(err: &QuantlabError) -> Self {
        let code: u8 = match err {
            QuantlabError::Io(_) => 1,
            QuantlabError::ConfigParse { .. }
            | QuantlabError::ConfigMissing { .. }
            | QuantlabError::ConfigInvalid { .. } => 2,
            QuantlabError::DataLoad { .. } => 3,
            QuantlabError::UnknownStrategy { .. } | QuantlabError::InvalidWindows { .. } => 4,
            QuantlabError::EmptySeries
            | QuantlabError::UnorderedDates { .. }
            | QuantlabError::NonNumeric { .. }
            | QuantlabError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
