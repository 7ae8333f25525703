//! Error types shared across FairRec crates.

use thiserror::Error;

/// Errors raised at the edges of the system: loading a corpus, reading
/// configuration, or accepting parameters from a caller.
///
/// The recommenders and metrics never produce these; degenerate input there
/// resolves to a defined fallback value instead.
#[derive(Debug, Error)]
pub enum FairRecError {
    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
        /// Environment variable that caused the failure, when known
        key: Option<String>,
    },

    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FairRecError {
    pub fn configuration(message: impl Into<String>, key: &str) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}

impl From<serde_json::Error> for FairRecError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<validator::ValidationErrors> for FairRecError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::InvalidParameters(err.to_string())
    }
}
