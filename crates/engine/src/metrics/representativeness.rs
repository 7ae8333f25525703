//! Representativeness: catalog spread and list variety

use crate::types::RecommendationSet;
use fairrec_core::{Corpus, ItemId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

const GENRE_SATURATION: f64 = 10.0;
const CULTURE_SATURATION: f64 = 15.0;
const GROUP_SATURATION: f64 = 12.0;

const GENRE_POINTS: f64 = 30.0;
const CULTURE_POINTS: f64 = 40.0;
const GROUP_POINTS: f64 = 30.0;

const INTRA_GENRE_WEIGHT: f64 = 0.6;
const INTRA_CULTURE_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageDiversity {
    /// 0-100
    pub score: f64,
    pub unique_genres: usize,
    pub unique_cultures: usize,
    pub unique_groups: usize,
}

/// Distinct genres, cultures and cast groups across every recommended item
///
/// Each count saturates at its cap (10 genres, 15 cultures, 12 groups).
pub fn coverage_diversity(set: &RecommendationSet) -> CoverageDiversity {
    let mut genres = HashSet::new();
    let mut cultures = HashSet::new();
    let mut groups = HashSet::new();

    for rec in set.recommendations() {
        genres.extend(rec.item.genres.iter().map(String::as_str));
        cultures.extend(rec.item.metadata.cultural_representation.iter().map(String::as_str));
        groups.extend(rec.item.metadata.cast_diversity.iter().map(String::as_str));
    }

    let saturate = |count: usize, cap: f64| (count as f64 / cap).min(1.0);
    let score = saturate(genres.len(), GENRE_SATURATION) * GENRE_POINTS
        + saturate(cultures.len(), CULTURE_SATURATION) * CULTURE_POINTS
        + saturate(groups.len(), GROUP_SATURATION) * GROUP_POINTS;

    CoverageDiversity {
        score,
        unique_genres: genres.len(),
        unique_cultures: cultures.len(),
        unique_groups: groups.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InequalityLevel {
    #[serde(rename = "low inequality")]
    Low,
    #[serde(rename = "moderate inequality")]
    Moderate,
    #[serde(rename = "high inequality")]
    High,
}

impl InequalityLevel {
    pub fn from_coefficient(coefficient: f64) -> Self {
        if coefficient < 0.3 {
            Self::Low
        } else if coefficient < 0.6 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low inequality",
            Self::Moderate => "moderate inequality",
            Self::High => "high inequality",
        }
    }
}

impl fmt::Display for InequalityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GiniCoefficient {
    pub coefficient: f64,
    pub interpretation: InequalityLevel,
}

/// Gini coefficient of recommendation frequency over the whole catalog
///
/// Items never recommended count as zero. With no recommendations at all the
/// coefficient is 1.0.
pub fn gini_coefficient(set: &RecommendationSet, corpus: &Corpus) -> GiniCoefficient {
    let mut counts: HashMap<ItemId, u64> = corpus.items().iter().map(|item| (item.id, 0)).collect();
    for rec in set.recommendations() {
        *counts.entry(rec.item_id).or_insert(0) += 1;
    }

    let mut frequencies: Vec<u64> = counts.into_values().collect();
    frequencies.sort_unstable();

    let n = frequencies.len() as f64;
    let total: u64 = frequencies.iter().sum();

    let coefficient = if total == 0 {
        1.0
    } else {
        let weighted: f64 = frequencies
            .iter()
            .enumerate()
            .map(|(i, &x)| (2.0 * (i + 1) as f64 - n - 1.0) * x as f64)
            .sum();
        weighted / (n * total as f64)
    };

    GiniCoefficient {
        coefficient,
        interpretation: InequalityLevel::from_coefficient(coefficient),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntraListDiversity {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Per-user `(genres / len) × 0.6 + (cultures / len) × 0.4`
///
/// Empty lists score 0; with no users every statistic is 0.
pub fn intra_list_diversity(set: &RecommendationSet) -> IntraListDiversity {
    let scores: Vec<f64> = set
        .iter()
        .map(|(_, recs)| {
            if recs.is_empty() {
                return 0.0;
            }
            let genres: HashSet<&str> = recs
                .iter()
                .flat_map(|rec| rec.item.genres.iter().map(String::as_str))
                .collect();
            let cultures: HashSet<&str> = recs
                .iter()
                .flat_map(|rec| rec.item.metadata.cultural_representation.iter().map(String::as_str))
                .collect();

            let len = recs.len() as f64;
            genres.len() as f64 / len * INTRA_GENRE_WEIGHT
                + cultures.len() as f64 / len * INTRA_CULTURE_WEIGHT
        })
        .collect();

    if scores.is_empty() {
        return IntraListDiversity {
            average: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }

    IntraListDiversity {
        average: scores.iter().sum::<f64>() / scores.len() as f64,
        min: scores.iter().copied().fold(f64::INFINITY, f64::min),
        max: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}
