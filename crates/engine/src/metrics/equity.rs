//! Equity: do demographic groups receive comparable outcomes?

use super::{mean_popularity, mean_score, Dimension};
use crate::types::RecommendationSet;
use fairrec_core::Corpus;
use ndarray::Array1;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOutcome {
    /// Mean over the group's users of each user's average recommendation score
    pub avg_relevance: f64,
    pub avg_popularity: f64,
    pub user_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionParity {
    pub groups: BTreeMap<String, GroupOutcome>,
    /// Coefficient of variation of the group relevance means
    pub disparity: f64,
    /// `max(0, 1 − disparity) × 100`
    pub parity_score: f64,
}

pub type DemographicParity = BTreeMap<Dimension, DimensionParity>;

#[derive(Default)]
struct GroupTotals {
    users: usize,
    relevance: f64,
    popularity: f64,
}

/// Demographic parity over gender, age and ethnicity
///
/// Only users that have an entry in the set and exist in the corpus are
/// grouped. An empty list contributes averages of 0.
pub fn demographic_parity(set: &RecommendationSet, corpus: &Corpus) -> DemographicParity {
    let mut totals: BTreeMap<Dimension, BTreeMap<String, GroupTotals>> = BTreeMap::new();

    for (user_id, recs) in set {
        let Some(user) = corpus.user(*user_id) else {
            continue;
        };

        let relevance = mean_score(recs);
        let popularity = mean_popularity(recs);

        for dimension in Dimension::CORE {
            let group = dimension.group_of(&user.demographics).to_string();
            let entry = totals.entry(dimension).or_default().entry(group).or_default();
            entry.users += 1;
            entry.relevance += relevance;
            entry.popularity += popularity;
        }
    }

    Dimension::CORE
        .into_iter()
        .map(|dimension| {
            let groups: BTreeMap<String, GroupOutcome> = totals
                .remove(&dimension)
                .unwrap_or_default()
                .into_iter()
                .map(|(group, t)| {
                    let outcome = GroupOutcome {
                        avg_relevance: t.relevance / t.users as f64,
                        avg_popularity: t.popularity / t.users as f64,
                        user_count: t.users,
                    };
                    (group, outcome)
                })
                .collect();

            let means: Array1<f64> = groups.values().map(|g| g.avg_relevance).collect();
            let disparity = coefficient_of_variation(&means);

            let parity = DimensionParity {
                groups,
                disparity,
                parity_score: (1.0 - disparity).max(0.0) * 100.0,
            };
            (dimension, parity)
        })
        .collect()
}

/// Population standard deviation over mean, 0 when the mean is not positive
fn coefficient_of_variation(values: &Array1<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.mean().unwrap_or(0.0);
    if mean <= 0.0 {
        return 0.0;
    }
    values.std(0.0) / mean
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDisparity {
    pub max_relevance: f64,
    pub min_relevance: f64,
    /// `(max − min) / max × 100`
    pub disparity: f64,
}

pub type RelevanceDisparity = BTreeMap<Dimension, GroupDisparity>;

/// Relevance disparity over all five dimensions
///
/// Every corpus user is grouped; users without a list count with an average
/// score of 0.
pub fn relevance_disparity(set: &RecommendationSet, corpus: &Corpus) -> RelevanceDisparity {
    let user_relevance: Vec<f64> = corpus
        .users()
        .iter()
        .map(|user| mean_score(set.list_for(user.id)))
        .collect();

    Dimension::ALL
        .into_iter()
        .map(|dimension| {
            let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
            for (user, relevance) in corpus.users().iter().zip(&user_relevance) {
                let group = match dimension.group_of(&user.demographics) {
                    "" => "none",
                    value => value,
                };
                groups.entry(group).or_default().push(*relevance);
            }

            let means: Vec<f64> = groups
                .values()
                .map(|values| values.iter().sum::<f64>() / values.len() as f64)
                .collect();

            (dimension, group_disparity(&means))
        })
        .collect()
}

fn group_disparity(means: &[f64]) -> GroupDisparity {
    if means.is_empty() {
        return GroupDisparity {
            max_relevance: 0.0,
            min_relevance: 0.0,
            disparity: 0.0,
        };
    }

    let max = means.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = means.iter().copied().fold(f64::INFINITY, f64::min);
    let disparity = if max > 0.0 { (max - min) / max * 100.0 } else { 0.0 };

    GroupDisparity {
        max_relevance: max,
        min_relevance: min,
        disparity,
    }
}

/// Mean disparity across every reported dimension, 0 when none are reported
pub fn mean_relevance_disparity(disparity: &RelevanceDisparity) -> f64 {
    if disparity.is_empty() {
        return 0.0;
    }
    disparity.values().map(|d| d.disparity).sum::<f64>() / disparity.len() as f64
}
