//! Full experiment runs over synthetic corpora

mod common;

use common::random_corpus;
use fairrec_core::Parameters;
use fairrec_engine::{
    ExperimentError, ExperimentRunner, ExperimentStatus, InsightKind, Phase,
};
use std::sync::Arc;

#[test]
fn test_full_run_produces_export_document() {
    let corpus = Arc::new(random_corpus(2024, 60, 120));
    let mut runner = ExperimentRunner::new(Arc::clone(&corpus), Parameters::default());

    runner.run().unwrap();
    assert_eq!(runner.status(), ExperimentStatus::Complete);

    let baseline = runner.baseline_recommendations().unwrap();
    let inclusive = runner.inclusive_recommendations().unwrap();
    assert_eq!(baseline.user_count(), 60);
    assert_eq!(inclusive.user_count(), 60);

    let export = runner.export().unwrap();
    let json = serde_json::to_value(&export).unwrap();

    for key in [
        "runId",
        "timestamp",
        "parameters",
        "baselineMetrics",
        "inclusiveMetrics",
        "comparison",
        "insights",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["parameters"]["numRecommendations"], 10);
    assert!(json["comparison"]["representativeness"]["coverageDiversity"]["improvement"].is_number());
    assert!(json["comparison"]["equity"]["relevanceDisparity"]["baseline"].is_number());
    assert_eq!(
        export.insights.last().map(|i| i.kind),
        Some(InsightKind::Conclusion)
    );
}

#[test]
fn test_comparison_matches_reported_metrics() {
    let corpus = Arc::new(random_corpus(77, 40, 90));
    let mut runner = ExperimentRunner::new(corpus, Parameters::default());
    runner.run().unwrap();

    let export = runner.export().unwrap();
    let coverage = export.comparison.representativeness.coverage_diversity;
    assert_eq!(
        coverage.baseline,
        export.baseline_metrics.representativeness.coverage_diversity.score
    );
    assert_eq!(
        coverage.inclusive,
        export.inclusive_metrics.representativeness.coverage_diversity.score
    );
    assert_eq!(coverage.improvement, coverage.inclusive - coverage.baseline);

    let gini = export.comparison.representativeness.gini;
    assert_eq!(gini.improvement, gini.baseline - gini.inclusive);

    let popularity = export.comparison.bias.popularity;
    assert_eq!(
        popularity.improvement,
        popularity.baseline.abs() - popularity.inclusive.abs()
    );
}

#[test]
fn test_stepwise_run_and_reset() {
    let corpus = Arc::new(random_corpus(5, 10, 20));
    let mut runner = ExperimentRunner::new(corpus, Parameters::default());

    let phases: Vec<Phase> = (0..4).map(|_| runner.advance().unwrap()).collect();
    assert_eq!(
        phases,
        vec![Phase::Baseline, Phase::Inclusive, Phase::Metrics, Phase::Comparison]
    );
    assert!(matches!(
        runner.advance(),
        Err(ExperimentError::NotReady(ExperimentStatus::Complete))
    ));

    runner.reset();
    assert!(matches!(
        runner.export(),
        Err(ExperimentError::NotComplete(ExperimentStatus::Ready))
    ));
}

#[test]
fn test_runs_are_deterministic_for_fixed_input() {
    let corpus = Arc::new(random_corpus(31, 30, 50));
    let params = Parameters {
        num_recommendations: 7,
        repetition_penalty: 0.8,
        ..Parameters::default()
    };

    let mut first = ExperimentRunner::new(Arc::clone(&corpus), params);
    let mut second = ExperimentRunner::new(Arc::clone(&corpus), params);
    first.run().unwrap();
    second.run().unwrap();

    assert_eq!(first.inclusive_recommendations(), second.inclusive_recommendations());
    assert_eq!(first.metrics(), second.metrics());
}

#[test]
fn test_empty_corpus_completes_with_sentinels() {
    let corpus = Arc::new(fairrec_core::Corpus::new(Vec::new(), Vec::new()).unwrap());
    let mut runner = ExperimentRunner::new(corpus, Parameters::default());
    runner.run().unwrap();

    let export = runner.export().unwrap();
    let metrics = &export.inclusive_metrics;
    assert_eq!(metrics.representativeness.gini_coefficient.coefficient, 1.0);
    assert_eq!(metrics.accessibility.coverage.coverage, 100.0);
    assert_eq!(metrics.bias.popularity.bias, 0.0);
    assert_eq!(metrics.representativeness.intra_list_diversity.average, 0.0);
}
