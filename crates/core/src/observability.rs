//! Structured logging initialisation
//!
//! JSON output is the default so experiment logs can be shipped as-is;
//! `pretty` is meant for local runs.

use crate::config::{parse_env_var, ConfigLoader};
use crate::error::FairRecError;
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter '{0}': {1}")]
    InvalidFilter(String, String),

    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging configuration
///
/// # Environment Variables
///
/// - `FAIRREC_LOG_LEVEL` (optional, fallback `RUST_LOG`): filter directive (default: info)
/// - `FAIRREC_LOG_FORMAT` (optional): `json` or `pretty` (default: json)
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl ConfigLoader for LogConfig {
    fn from_env() -> Result<Self, FairRecError> {
        let level = std::env::var("FAIRREC_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| LogConfig::default().level);
        let format = parse_env_var("FAIRREC_LOG_FORMAT", LogFormat::default())?;

        Ok(Self { level, format })
    }

    fn validate(&self) -> Result<(), FairRecError> {
        EnvFilter::try_new(&self.level).map_err(|e| {
            FairRecError::configuration(
                format!("Invalid log level '{}': {}", self.level, e),
                "FAIRREC_LOG_LEVEL",
            )
        })?;
        Ok(())
    }
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| ObservabilityError::InvalidFilter(config.level.clone(), e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    result.map_err(|e| ObservabilityError::SubscriberInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_config_validation() {
        assert!(LogConfig::default().validate().is_ok());

        let config = LogConfig {
            level: "fairrec_engine=debug,info".to_string(),
            format: LogFormat::Pretty,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let config = LogConfig {
            level: "fairrec_engine=notalevel".to_string(),
            format: LogFormat::Json,
        };
        assert!(config.validate().is_err());
        assert!(matches!(
            init_logging(&config),
            Err(ObservabilityError::InvalidFilter(_, _))
        ));
    }
}
