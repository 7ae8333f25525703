//! FairRec Engine
//!
//! Baseline and inclusive recommenders over an immutable corpus, the
//! inclusiveness metrics that compare them, and the experiment runner and
//! HTTP host built on top.
//!
//! A typical run:
//!
//! ```no_run
//! use fairrec_core::{Corpus, Parameters};
//! use fairrec_engine::ExperimentRunner;
//! use std::sync::Arc;
//!
//! # fn example(corpus: Corpus) -> Result<(), Box<dyn std::error::Error>> {
//! let mut runner = ExperimentRunner::new(Arc::new(corpus), Parameters::default());
//! runner.run()?;
//! let export = runner.export()?;
//! println!("{}", serde_json::to_string_pretty(&export)?);
//! # Ok(())
//! # }
//! ```

pub mod baseline;
pub mod cache;
pub mod comparison;
pub mod diversity;
pub mod experiment;
pub mod inclusive;
pub mod insights;
pub mod metrics;
pub mod recommender;
pub mod scoring;
pub mod server;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export key types
pub use baseline::BaselineRecommender;
pub use cache::{Neighbor, Neighborhood, SimilarityCache};
pub use comparison::{ComparisonReporter, ComparisonResult, MetricComparison};
pub use diversity::ApplyDiversityFilter;
pub use experiment::{ExperimentError, ExperimentExport, ExperimentRunner, ExperimentStatus, Phase};
pub use inclusive::{InclusiveConfig, InclusiveRecommender};
pub use insights::{generate_insights, Insight, InsightKind, InsightLevel};
pub use metrics::{calculate_all_metrics, Dimension, MetricsReport};
pub use recommender::Recommender;
pub use types::{Algorithm, Recommendation, RecommendationSet, ScoreBreakdown, ScoredCandidate};
