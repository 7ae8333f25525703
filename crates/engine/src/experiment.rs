//! Experiment orchestration
//!
//! A run moves through four phases, one per [`ExperimentRunner::advance`]:
//!
//! ```text
//! Ready -> Running(baseline) -> Running(inclusive) -> Running(metrics) -> Complete
//! ```
//!
//! `Running(phase)` names the most recently completed phase. The comparison
//! and insights are produced by the final step into `Complete`. Results can
//! only be exported from `Complete`; [`ExperimentRunner::reset`] drops them
//! and returns to `Ready` with a fresh run id.

use crate::baseline::BaselineRecommender;
use crate::comparison::{ComparisonReporter, ComparisonResult};
use crate::inclusive::InclusiveRecommender;
use crate::insights::{generate_insights, Insight};
use crate::metrics::{calculate_all_metrics, MetricsReport};
use crate::recommender::Recommender;
use crate::types::RecommendationSet;
use chrono::{DateTime, Utc};
use fairrec_core::{Corpus, Parameters};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

/// Experiment phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Baseline,
    Inclusive,
    Metrics,
    Comparison,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Baseline => "baseline",
            Self::Inclusive => "inclusive",
            Self::Metrics => "metrics",
            Self::Comparison => "comparison",
        };
        f.write_str(name)
    }
}

/// Experiment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "phase", rename_all = "lowercase")]
pub enum ExperimentStatus {
    Ready,
    Running(Phase),
    Complete,
}

impl fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("ready"),
            Self::Running(phase) => write!(f, "running ({phase})"),
            Self::Complete => f.write_str("complete"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExperimentError {
    #[error("Experiment cannot advance from status {0}; reset it first")]
    NotReady(ExperimentStatus),

    #[error("Experiment has not completed (status: {0})")]
    NotComplete(ExperimentStatus),
}

/// Exported results of a completed run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentExport {
    pub run_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub parameters: Parameters,
    pub baseline_metrics: MetricsReport,
    pub inclusive_metrics: MetricsReport,
    pub comparison: ComparisonResult,
    pub insights: Vec<Insight>,
}

/// Results accumulated so far; each variant holds exactly what its phase
/// has produced.
enum Stage {
    Ready,
    Baseline {
        baseline: RecommendationSet,
    },
    Inclusive {
        baseline: RecommendationSet,
        inclusive: RecommendationSet,
    },
    Metrics {
        baseline: RecommendationSet,
        inclusive: RecommendationSet,
        baseline_metrics: MetricsReport,
        inclusive_metrics: MetricsReport,
    },
    Complete(Box<CompletedRun>),
}

struct CompletedRun {
    baseline: RecommendationSet,
    inclusive: RecommendationSet,
    baseline_metrics: MetricsReport,
    inclusive_metrics: MetricsReport,
    comparison: ComparisonResult,
    insights: Vec<Insight>,
    completed_at: DateTime<Utc>,
}

/// Drives one baseline-vs-inclusive experiment over a fixed corpus
pub struct ExperimentRunner {
    run_id: Uuid,
    corpus: Arc<Corpus>,
    parameters: Parameters,
    stage: Stage,
}

impl ExperimentRunner {
    pub fn new(corpus: Arc<Corpus>, parameters: Parameters) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            corpus,
            parameters,
            stage: Stage::Ready,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    pub fn status(&self) -> ExperimentStatus {
        match self.stage {
            Stage::Ready => ExperimentStatus::Ready,
            Stage::Baseline { .. } => ExperimentStatus::Running(Phase::Baseline),
            Stage::Inclusive { .. } => ExperimentStatus::Running(Phase::Inclusive),
            Stage::Metrics { .. } => ExperimentStatus::Running(Phase::Metrics),
            Stage::Complete(_) => ExperimentStatus::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.stage, Stage::Complete(_))
    }

    /// Execute the next phase and return it
    ///
    /// # Errors
    ///
    /// Returns `NotReady` when the run is already complete.
    #[instrument(skip(self), fields(run_id = %self.run_id, status = %self.status()))]
    pub fn advance(&mut self) -> Result<Phase, ExperimentError> {
        let n = self.parameters.num_recommendations;

        let (next, phase) = match std::mem::replace(&mut self.stage, Stage::Ready) {
            Stage::Ready => {
                let recommender = BaselineRecommender::new(Arc::clone(&self.corpus));
                let baseline = recommender.recommend_for_all(n);
                (Stage::Baseline { baseline }, Phase::Baseline)
            }
            Stage::Baseline { baseline } => {
                let recommender =
                    InclusiveRecommender::new(Arc::clone(&self.corpus), self.parameters.into());
                let inclusive = recommender.recommend_for_all(n);
                (
                    Stage::Inclusive {
                        baseline,
                        inclusive,
                    },
                    Phase::Inclusive,
                )
            }
            Stage::Inclusive {
                baseline,
                inclusive,
            } => {
                let baseline_metrics = calculate_all_metrics(&baseline, &self.corpus);
                let inclusive_metrics = calculate_all_metrics(&inclusive, &self.corpus);
                (
                    Stage::Metrics {
                        baseline,
                        inclusive,
                        baseline_metrics,
                        inclusive_metrics,
                    },
                    Phase::Metrics,
                )
            }
            Stage::Metrics {
                baseline,
                inclusive,
                baseline_metrics,
                inclusive_metrics,
            } => {
                let comparison = ComparisonReporter::compare(&baseline_metrics, &inclusive_metrics);
                let insights = generate_insights(&baseline_metrics, &inclusive_metrics);
                let completed = CompletedRun {
                    baseline,
                    inclusive,
                    baseline_metrics,
                    inclusive_metrics,
                    comparison,
                    insights,
                    completed_at: Utc::now(),
                };
                (Stage::Complete(Box::new(completed)), Phase::Comparison)
            }
            complete @ Stage::Complete(_) => {
                self.stage = complete;
                return Err(ExperimentError::NotReady(ExperimentStatus::Complete));
            }
        };

        self.stage = next;
        info!(phase = %phase, status = %self.status(), "Experiment phase completed");
        Ok(phase)
    }

    /// Execute every remaining phase
    ///
    /// # Errors
    ///
    /// Returns `NotReady` when the run is already complete.
    #[instrument(skip(self), fields(run_id = %self.run_id))]
    pub fn run(&mut self) -> Result<(), ExperimentError> {
        if self.is_complete() {
            return Err(ExperimentError::NotReady(ExperimentStatus::Complete));
        }
        while !self.is_complete() {
            self.advance()?;
        }
        info!(
            users = self.corpus.user_count(),
            items = self.corpus.item_count(),
            "Experiment completed"
        );
        Ok(())
    }

    /// Drop all results and return to `Ready` under a new run id
    pub fn reset(&mut self) {
        self.stage = Stage::Ready;
        self.run_id = Uuid::new_v4();
        info!(run_id = %self.run_id, "Experiment reset");
    }

    /// Export document of a completed run
    ///
    /// # Errors
    ///
    /// Returns `NotComplete` unless the run is complete.
    pub fn export(&self) -> Result<ExperimentExport, ExperimentError> {
        let Stage::Complete(run) = &self.stage else {
            return Err(ExperimentError::NotComplete(self.status()));
        };

        Ok(ExperimentExport {
            run_id: self.run_id,
            timestamp: run.completed_at,
            parameters: self.parameters,
            baseline_metrics: run.baseline_metrics.clone(),
            inclusive_metrics: run.inclusive_metrics.clone(),
            comparison: run.comparison.clone(),
            insights: run.insights.clone(),
        })
    }

    pub fn baseline_recommendations(&self) -> Option<&RecommendationSet> {
        match &self.stage {
            Stage::Ready => None,
            Stage::Baseline { baseline }
            | Stage::Inclusive { baseline, .. }
            | Stage::Metrics { baseline, .. } => Some(baseline),
            Stage::Complete(run) => Some(&run.baseline),
        }
    }

    pub fn inclusive_recommendations(&self) -> Option<&RecommendationSet> {
        match &self.stage {
            Stage::Ready | Stage::Baseline { .. } => None,
            Stage::Inclusive { inclusive, .. } | Stage::Metrics { inclusive, .. } => Some(inclusive),
            Stage::Complete(run) => Some(&run.inclusive),
        }
    }

    /// Baseline and inclusive reports, once the metrics phase has run
    pub fn metrics(&self) -> Option<(&MetricsReport, &MetricsReport)> {
        match &self.stage {
            Stage::Metrics {
                baseline_metrics,
                inclusive_metrics,
                ..
            } => Some((baseline_metrics, inclusive_metrics)),
            Stage::Complete(run) => Some((&run.baseline_metrics, &run.inclusive_metrics)),
            _ => None,
        }
    }
}
