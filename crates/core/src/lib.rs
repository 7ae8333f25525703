//! # FairRec Core
//!
//! Core data structures shared by the FairRec recommendation experiment.
//!
//! This crate provides the immutable corpus (users and items), experiment
//! parameters, set-based similarity functions, error handling and the
//! ambient configuration and logging setup used by the engine and service.
//!
//! ## Modules
//!
//! - `models`: Users, items, corpus and experiment parameters
//! - `similarity`: Set-based similarity between histories and preference sets
//! - `error`: Error types and handling
//! - `config`: Configuration loading and validation
//! - `observability`: Structured logging initialisation

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod similarity;

// Re-export commonly used types
pub use config::{load_dotenv, ConfigLoader, ServiceConfig};
pub use error::FairRecError;
pub use models::corpus::Corpus;
pub use models::item::{AccessibilityFlags, Item, ItemId, ItemMetadata, DISABILITY_REPRESENTATION_TAG};
pub use models::parameters::Parameters;
pub use models::user::{AccessibilityNeed, Demographics, Preferences, User, UserId};
pub use observability::{init_logging, LogConfig, LogFormat, ObservabilityError};
pub use similarity::{history_similarity, set_similarity};

/// Result type alias for FairRec operations
pub type Result<T> = std::result::Result<T, FairRecError>;
