//! Inclusiveness metrics
//!
//! Every metric is a pure function of a [`RecommendationSet`] and the
//! [`Corpus`] it was produced from. Degenerate input (empty lists, empty
//! catalog, zero popularity) is answered with documented sentinel values
//! rather than errors.

pub mod accessibility;
pub mod bias;
pub mod equity;
pub mod representativeness;

pub use accessibility::{
    accessibility_coverage, accessibility_match_rate, AccessibilityCoverage,
    AccessibilityMatchRate, NeedMatch,
};
pub use bias::{
    demographic_bias, popularity_bias, DemographicBias, GroupRepresentation, PopularityBias,
    PopularityBiasLevel, RepresentationBalance,
};
pub use equity::{
    demographic_parity, relevance_disparity, DemographicParity, DimensionParity, GroupDisparity,
    GroupOutcome, RelevanceDisparity,
};
pub use representativeness::{
    coverage_diversity, gini_coefficient, intra_list_diversity, CoverageDiversity,
    GiniCoefficient, InequalityLevel, IntraListDiversity,
};

use crate::types::{Recommendation, RecommendationSet};
use fairrec_core::{Corpus, Demographics};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

/// Demographic attribute used to group users
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Gender,
    Age,
    Ethnicity,
    Disability,
    Socioeconomic,
}

impl Dimension {
    /// Dimensions compared by demographic parity and self-representation bias
    pub const CORE: [Dimension; 3] = [Self::Gender, Self::Age, Self::Ethnicity];

    /// Dimensions compared by relevance disparity
    pub const ALL: [Dimension; 5] = [
        Self::Gender,
        Self::Age,
        Self::Ethnicity,
        Self::Disability,
        Self::Socioeconomic,
    ];

    /// The user's group along this dimension
    ///
    /// A missing disability falls into the literal "none" bucket.
    pub fn group_of(self, demographics: &Demographics) -> &str {
        match self {
            Self::Gender => &demographics.gender,
            Self::Age => &demographics.age,
            Self::Ethnicity => &demographics.ethnicity,
            Self::Disability => demographics.disability_group(),
            Self::Socioeconomic => &demographics.socioeconomic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Ethnicity => "ethnicity",
            Self::Disability => "disability",
            Self::Socioeconomic => "socioeconomic",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativenessMetrics {
    pub coverage_diversity: CoverageDiversity,
    pub gini_coefficient: GiniCoefficient,
    pub intra_list_diversity: IntraListDiversity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityMetrics {
    pub demographic_parity: DemographicParity,
    pub relevance_disparity: RelevanceDisparity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityMetrics {
    pub coverage: AccessibilityCoverage,
    pub match_rate: AccessibilityMatchRate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiasMetrics {
    pub popularity: PopularityBias,
    pub demographic: DemographicBias,
}

/// All metrics for one recommendation set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub representativeness: RepresentativenessMetrics,
    pub equity: EquityMetrics,
    pub accessibility: AccessibilityMetrics,
    pub bias: BiasMetrics,
}

/// Compute every metric for a recommendation set
#[instrument(skip(set, corpus), fields(users = set.user_count()))]
pub fn calculate_all_metrics(set: &RecommendationSet, corpus: &Corpus) -> MetricsReport {
    let representativeness = RepresentativenessMetrics {
        coverage_diversity: coverage_diversity(set),
        gini_coefficient: gini_coefficient(set, corpus),
        intra_list_diversity: intra_list_diversity(set),
    };
    debug!(
        coverage = representativeness.coverage_diversity.score,
        gini = representativeness.gini_coefficient.coefficient,
        "Computed representativeness metrics"
    );

    let equity = EquityMetrics {
        demographic_parity: demographic_parity(set, corpus),
        relevance_disparity: relevance_disparity(set, corpus),
    };

    let accessibility = AccessibilityMetrics {
        coverage: accessibility_coverage(set, corpus),
        match_rate: accessibility_match_rate(set, corpus),
    };
    debug!(
        coverage = accessibility.coverage.coverage,
        users_with_needs = accessibility.coverage.users_with_needs,
        "Computed accessibility metrics"
    );

    let bias = BiasMetrics {
        popularity: popularity_bias(set, corpus),
        demographic: demographic_bias(set, corpus),
    };

    info!(
        recommendations = set.total_recommendations(),
        popularity_bias = bias.popularity.bias,
        "Metrics calculated"
    );

    MetricsReport {
        representativeness,
        equity,
        accessibility,
        bias,
    }
}

/// Mean recommendation score of one list, 0 when empty
pub(crate) fn mean_score(recommendations: &[Recommendation]) -> f64 {
    mean_of(recommendations, |rec| rec.score)
}

/// Mean item popularity of one list, 0 when empty
pub(crate) fn mean_popularity(recommendations: &[Recommendation]) -> f64 {
    mean_of(recommendations, |rec| rec.item.popularity())
}

fn mean_of<F>(recommendations: &[Recommendation], value: F) -> f64
where
    F: Fn(&Recommendation) -> f64,
{
    if recommendations.is_empty() {
        return 0.0;
    }
    recommendations.iter().map(value).sum::<f64>() / recommendations.len() as f64
}
