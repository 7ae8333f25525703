//! Shared configuration loader for FairRec
//!
//! Configuration is read from environment variables with the `FAIRREC_`
//! prefix, optionally seeded from a `.env` file. Precedence is
//! defaults < .env < environment.
//!
//! # Example
//!
//! ```no_run
//! use fairrec_core::config::{load_dotenv, ConfigLoader, ServiceConfig};
//! use fairrec_core::Parameters;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! load_dotenv();
//!
//! let service = ServiceConfig::from_env()?;
//! let defaults = Parameters::from_env()?;
//!
//! service.validate()?;
//! defaults.validate()?;
//! # Ok(())
//! # }
//! ```

use crate::error::FairRecError;
use crate::models::parameters::Parameters;
use std::path::PathBuf;

/// Configuration loader trait
///
/// Provides standardized methods for loading and validating configuration from
/// environment variables.
pub trait ConfigLoader: Sized {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if a variable is set but cannot be parsed.
    fn from_env() -> Result<Self, FairRecError>;

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` naming the offending key.
    fn validate(&self) -> Result<(), FairRecError>;
}

/// HTTP host configuration
///
/// # Environment Variables
///
/// - `FAIRREC_HOST` (optional, fallback `HOST`): bind host (default: 0.0.0.0)
/// - `FAIRREC_PORT` (optional, fallback `PORT`): bind port (default: 8090)
/// - `FAIRREC_WORKERS` (optional): HTTP worker threads (default: 4)
/// - `FAIRREC_CORPUS_PATH` (optional): JSON corpus loaded at start-up
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub corpus_path: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
            workers: 4,
            corpus_path: None,
        }
    }
}

impl ConfigLoader for ServiceConfig {
    fn from_env() -> Result<Self, FairRecError> {
        let defaults = ServiceConfig::default();

        let host = std::env::var("FAIRREC_HOST")
            .or_else(|_| std::env::var("HOST"))
            .unwrap_or(defaults.host);

        let port = match std::env::var("FAIRREC_PORT") {
            Ok(_) => parse_env_var("FAIRREC_PORT", defaults.port)?,
            Err(_) => parse_env_var("PORT", defaults.port)?,
        };

        let workers = parse_env_var("FAIRREC_WORKERS", defaults.workers)?;

        let corpus_path = std::env::var("FAIRREC_CORPUS_PATH")
            .ok()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            workers,
            corpus_path,
        })
    }

    fn validate(&self) -> Result<(), FairRecError> {
        if self.port == 0 {
            return Err(FairRecError::configuration(
                "port must be greater than 0",
                "FAIRREC_PORT",
            ));
        }

        if self.workers == 0 {
            return Err(FairRecError::configuration(
                "workers must be greater than 0",
                "FAIRREC_WORKERS",
            ));
        }

        if let Some(path) = &self.corpus_path {
            if !path.exists() {
                return Err(FairRecError::configuration(
                    format!("corpus file {} does not exist", path.display()),
                    "FAIRREC_CORPUS_PATH",
                ));
            }
        }

        Ok(())
    }
}

/// Experiment defaults
///
/// # Environment Variables
///
/// - `FAIRREC_NUM_RECOMMENDATIONS` (default: 10)
/// - `FAIRREC_DIVERSITY_WEIGHT` (default: 0.3, range 0-1)
/// - `FAIRREC_ACCESSIBILITY_WEIGHT` (default: 0.2, >= 0)
/// - `FAIRREC_REPRESENTATION_WEIGHT` (default: 0.2, >= 0)
/// - `FAIRREC_REPETITION_PENALTY` (default: 0.5, range 0-1)
impl ConfigLoader for Parameters {
    fn from_env() -> Result<Self, FairRecError> {
        let defaults = Parameters::default();

        Ok(Self {
            num_recommendations: parse_env_var(
                "FAIRREC_NUM_RECOMMENDATIONS",
                defaults.num_recommendations,
            )?,
            diversity_weight: parse_env_var("FAIRREC_DIVERSITY_WEIGHT", defaults.diversity_weight)?,
            accessibility_weight: parse_env_var(
                "FAIRREC_ACCESSIBILITY_WEIGHT",
                defaults.accessibility_weight,
            )?,
            representation_weight: parse_env_var(
                "FAIRREC_REPRESENTATION_WEIGHT",
                defaults.representation_weight,
            )?,
            repetition_penalty: parse_env_var(
                "FAIRREC_REPETITION_PENALTY",
                defaults.repetition_penalty,
            )?,
        })
    }

    fn validate(&self) -> Result<(), FairRecError> {
        validator::Validate::validate(self).map_err(FairRecError::from)
    }
}

/// Parse an environment variable, returning `default` when it is unset
///
/// # Errors
///
/// Returns a `ConfigurationError` if the value cannot be parsed
pub(crate) fn parse_env_var<T>(key: &str, default: T) -> Result<T, FairRecError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|v| {
            v.parse::<T>().map_err(|e| {
                FairRecError::configuration(format!("Failed to parse {}: {}", key, e), key)
            })
        })
        .unwrap_or(Ok(default))
}

/// Load .env file if present
///
/// Missing files are ignored; other failures are reported on stderr because
/// logging is not initialised yet at this point.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn set_test_env(key: &str, value: &str) {
        env::set_var(key, value);
    }

    fn clear_test_env(key: &str) {
        env::remove_var(key);
    }

    #[test]
    fn test_service_config_default() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8090);
        assert_eq!(config.workers, 4);
        assert!(config.corpus_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_service_config_from_env() {
        set_test_env("FAIRREC_PORT", "9100");
        set_test_env("FAIRREC_WORKERS", "2");

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.workers, 2);

        clear_test_env("FAIRREC_PORT");
        clear_test_env("FAIRREC_WORKERS");
    }

    #[test]
    fn test_service_config_validation_zero_workers() {
        let config = ServiceConfig {
            workers: 0,
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_service_config_validation_missing_corpus() {
        let config = ServiceConfig {
            corpus_path: Some(PathBuf::from("/definitely/not/here/corpus.json")),
            ..ServiceConfig::default()
        };
        let err = config.validate().unwrap_err();
        match err {
            FairRecError::ConfigurationError { key, .. } => {
                assert_eq!(key.as_deref(), Some("FAIRREC_CORPUS_PATH"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parameters_from_env() {
        set_test_env("FAIRREC_DIVERSITY_WEIGHT", "0.6");
        set_test_env("FAIRREC_NUM_RECOMMENDATIONS", "5");

        let params = Parameters::from_env().unwrap();
        assert_eq!(params.diversity_weight, 0.6);
        assert_eq!(params.num_recommendations, 5);
        assert_eq!(params.repetition_penalty, 0.5);
        assert!(ConfigLoader::validate(&params).is_ok());

        clear_test_env("FAIRREC_DIVERSITY_WEIGHT");
        clear_test_env("FAIRREC_NUM_RECOMMENDATIONS");
    }

    #[test]
    fn test_parameters_validation_rejects_out_of_range() {
        let params = Parameters {
            diversity_weight: 1.2,
            ..Parameters::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&params),
            Err(FairRecError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_parse_env_var_with_default() {
        let result: u32 = parse_env_var("FAIRREC_NON_EXISTENT_VAR", 42).unwrap();
        assert_eq!(result, 42);
    }

    #[test]
    fn test_parse_env_var_invalid_value() {
        set_test_env("FAIRREC_TEST_INVALID_VAR", "not-a-number");
        let result: Result<u32, _> = parse_env_var("FAIRREC_TEST_INVALID_VAR", 42);
        assert!(result.is_err());
        clear_test_env("FAIRREC_TEST_INVALID_VAR");
    }
}
