//! Domain error types.

/// Top-level error type for macdtrader.
#[derive(Debug, thiserror::Error)]
pub enum MacdError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MacdError {
    pub fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        MacdError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&MacdError> for std::process::ExitCode {
    fn from(err: &MacdError) -> Self {
        let code: u8 = match err {
            MacdError::Io(_) => 1,
            MacdError::ConfigParse { .. } | MacdError::ConfigInvalid { .. } => 2,
            MacdError::Report { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
