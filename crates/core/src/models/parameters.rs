//! Experiment parameters

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Knobs shared by an experiment run
///
/// Recommenders accept any value here without clamping. Range checks live in
/// [`Parameters::validate`], which the configuration loader and the HTTP host
/// call before starting a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameters {
    /// Length of each user's recommendation list
    #[validate(range(min = 1))]
    pub num_recommendations: usize,

    /// Weight shifted away from the collaborative/popularity base term
    #[validate(range(min = 0.0, max = 1.0))]
    pub diversity_weight: f64,

    #[validate(range(min = 0.0))]
    pub accessibility_weight: f64,

    #[validate(range(min = 0.0))]
    pub representation_weight: f64,

    /// Strength of the genre-overlap penalty during diversified selection
    #[validate(range(min = 0.0, max = 1.0))]
    pub repetition_penalty: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            num_recommendations: 10,
            diversity_weight: 0.3,
            accessibility_weight: 0.2,
            representation_weight: 0.2,
            repetition_penalty: 0.5,
        }
    }
}
