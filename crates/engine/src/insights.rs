//! Human-readable findings from a baseline/inclusive comparison

use crate::comparison::ComparisonReporter;
use crate::metrics::MetricsReport;
use serde::Serialize;

const SIGNIFICANT_DIVERSITY_GAIN: f64 = 10.0;
const SIGNIFICANT_GINI_REDUCTION: f64 = 0.1;
const SIGNIFICANT_ACCESSIBILITY_GAIN: f64 = 15.0;
const STRONG_POPULARITY_BIAS: f64 = 20.0;
const ACCEPTABLE_POPULARITY_BIAS: f64 = 15.0;
const SIGNIFICANT_DISPARITY_REDUCTION: f64 = 5.0;
const TARGET_ACCESSIBILITY_COVERAGE: f64 = 80.0;
const TARGET_COVERAGE_DIVERSITY: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Diversity,
    Distribution,
    Accessibility,
    PopularityBias,
    DemographicEquity,
    Suggestion,
    Conclusion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightLevel {
    /// Clear improvement
    Significant,
    /// Improvement below the significance threshold
    Moderate,
    Warning,
    Suggestion,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub level: InsightLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Insight {
    fn new(kind: InsightKind, level: InsightLevel, message: impl Into<String>) -> Self {
        Self {
            kind,
            level,
            message: message.into(),
            value: None,
        }
    }

    fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// Findings in a fixed order, always ending with the conclusion
pub fn generate_insights(baseline: &MetricsReport, inclusive: &MetricsReport) -> Vec<Insight> {
    let comparison = ComparisonReporter::compare(baseline, inclusive);
    let mut insights = Vec::new();

    let diversity_gain = comparison.representativeness.coverage_diversity.improvement;
    if diversity_gain > SIGNIFICANT_DIVERSITY_GAIN {
        insights.push(
            Insight::new(
                InsightKind::Diversity,
                InsightLevel::Significant,
                format!(
                    "Coverage diversity rose by {diversity_gain:.1} points; more groups are represented in the recommendations"
                ),
            )
            .with_value(diversity_gain),
        );
    } else if diversity_gain > 0.0 {
        insights.push(
            Insight::new(
                InsightKind::Diversity,
                InsightLevel::Moderate,
                format!("Coverage diversity rose by {diversity_gain:.1} points"),
            )
            .with_value(diversity_gain),
        );
    }

    let gini_reduction = comparison.representativeness.gini.improvement;
    if gini_reduction > SIGNIFICANT_GINI_REDUCTION {
        insights.push(
            Insight::new(
                InsightKind::Distribution,
                InsightLevel::Significant,
                format!(
                    "Gini coefficient fell by {:.1}%; recommendations are spread more evenly across the catalog",
                    gini_reduction * 100.0
                ),
            )
            .with_value(gini_reduction),
        );
    }

    let accessibility_gain = comparison.accessibility.coverage.improvement;
    if accessibility_gain > SIGNIFICANT_ACCESSIBILITY_GAIN {
        insights.push(
            Insight::new(
                InsightKind::Accessibility,
                InsightLevel::Significant,
                format!(
                    "{accessibility_gain:.1}% more users with accessibility needs receive suitable content"
                ),
            )
            .with_value(accessibility_gain),
        );
    } else if accessibility_gain > 0.0 {
        insights.push(
            Insight::new(
                InsightKind::Accessibility,
                InsightLevel::Moderate,
                format!("Accessibility coverage rose by {accessibility_gain:.1}%"),
            )
            .with_value(accessibility_gain),
        );
    }

    let popularity = comparison.bias.popularity;
    if popularity.baseline.abs() > STRONG_POPULARITY_BIAS {
        if popularity.inclusive.abs() < ACCEPTABLE_POPULARITY_BIAS {
            insights.push(Insight::new(
                InsightKind::PopularityBias,
                InsightLevel::Significant,
                "The inclusive algorithm substantially reduces the tendency to recommend only popular items",
            ));
        } else {
            insights.push(Insight::new(
                InsightKind::PopularityBias,
                InsightLevel::Warning,
                "Both algorithms still favour popular items; consider further tuning",
            ));
        }
    }

    let disparity_reduction = comparison.equity.relevance_disparity.improvement;
    if disparity_reduction > SIGNIFICANT_DISPARITY_REDUCTION {
        insights.push(
            Insight::new(
                InsightKind::DemographicEquity,
                InsightLevel::Significant,
                format!("Mean relevance disparity across demographic groups fell by {disparity_reduction:.1}%"),
            )
            .with_value(disparity_reduction),
        );
    }

    if inclusive.accessibility.coverage.coverage < TARGET_ACCESSIBILITY_COVERAGE {
        insights.push(Insight::new(
            InsightKind::Suggestion,
            InsightLevel::Suggestion,
            "Accessibility coverage can still improve; consider raising the accessibility weight",
        ));
    }

    if inclusive.representativeness.coverage_diversity.score < TARGET_COVERAGE_DIVERSITY {
        insights.push(Insight::new(
            InsightKind::Suggestion,
            InsightLevel::Suggestion,
            "Coverage diversity can still improve; consider raising the diversity weight",
        ));
    }

    insights.push(Insight::new(
        InsightKind::Conclusion,
        InsightLevel::Info,
        "Recommendations can be made more inclusive without a significant loss of relevance by deliberately promoting diversity, equity and accessibility",
    ));

    insights
}
