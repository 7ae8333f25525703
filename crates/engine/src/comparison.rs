//! Baseline vs inclusive comparison
//!
//! Improvement is signed so that a positive value always favours the
//! inclusive algorithm: gains for coverage metrics, reductions for
//! inequality, bias and disparity.

use crate::metrics::equity::mean_relevance_disparity;
use crate::metrics::MetricsReport;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricComparison {
    pub baseline: f64,
    pub inclusive: f64,
    pub improvement: f64,
}

impl MetricComparison {
    /// Higher is better: `inclusive − baseline`
    pub fn gain(baseline: f64, inclusive: f64) -> Self {
        Self {
            baseline,
            inclusive,
            improvement: inclusive - baseline,
        }
    }

    /// Lower is better: `baseline − inclusive`
    pub fn reduction(baseline: f64, inclusive: f64) -> Self {
        Self {
            baseline,
            inclusive,
            improvement: baseline - inclusive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativenessComparison {
    pub coverage_diversity: MetricComparison,
    pub gini: MetricComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityComparison {
    pub coverage: MetricComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasComparison {
    /// Raw signed biases; improvement compares magnitudes
    pub popularity: MetricComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityComparison {
    /// Mean relevance disparity across all dimensions
    pub relevance_disparity: MetricComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub representativeness: RepresentativenessComparison,
    pub accessibility: AccessibilityComparison,
    pub bias: BiasComparison,
    pub equity: EquityComparison,
}

pub struct ComparisonReporter;

impl ComparisonReporter {
    pub fn compare(baseline: &MetricsReport, inclusive: &MetricsReport) -> ComparisonResult {
        let (b_bias, i_bias) = (baseline.bias.popularity.bias, inclusive.bias.popularity.bias);

        ComparisonResult {
            representativeness: RepresentativenessComparison {
                coverage_diversity: MetricComparison::gain(
                    baseline.representativeness.coverage_diversity.score,
                    inclusive.representativeness.coverage_diversity.score,
                ),
                gini: MetricComparison::reduction(
                    baseline.representativeness.gini_coefficient.coefficient,
                    inclusive.representativeness.gini_coefficient.coefficient,
                ),
            },
            accessibility: AccessibilityComparison {
                coverage: MetricComparison::gain(
                    baseline.accessibility.coverage.coverage,
                    inclusive.accessibility.coverage.coverage,
                ),
            },
            bias: BiasComparison {
                popularity: MetricComparison {
                    baseline: b_bias,
                    inclusive: i_bias,
                    improvement: b_bias.abs() - i_bias.abs(),
                },
            },
            equity: EquityComparison {
                relevance_disparity: MetricComparison::reduction(
                    mean_relevance_disparity(&baseline.equity.relevance_disparity),
                    mean_relevance_disparity(&inclusive.equity.relevance_disparity),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_and_reduction_signs() {
        let gain = MetricComparison::gain(40.0, 70.0);
        assert_eq!(gain.improvement, 30.0);

        let reduction = MetricComparison::reduction(0.8, 0.5);
        assert!((reduction.improvement - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_comparison_serializes_camel_case_pairs() {
        let comparison = MetricComparison::gain(1.0, 2.0);
        let json = serde_json::to_value(comparison).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "baseline": 1.0, "inclusive": 2.0, "improvement": 1.0 })
        );
    }
}
