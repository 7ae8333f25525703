//! Bias: popularity skew and demographic self-representation

use super::Dimension;
use crate::types::RecommendationSet;
use fairrec_core::Corpus;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PopularityBiasLevel {
    #[serde(rename = "strong popularity bias")]
    Strong,
    #[serde(rename = "moderate popularity bias")]
    Moderate,
    #[serde(rename = "low bias")]
    Low,
    #[serde(rename = "bias toward less-popular items")]
    TowardLessPopular,
}

impl PopularityBiasLevel {
    pub fn from_bias(bias: f64) -> Self {
        if bias > 20.0 {
            Self::Strong
        } else if bias > 10.0 {
            Self::Moderate
        } else if bias > -10.0 {
            Self::Low
        } else {
            Self::TowardLessPopular
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong popularity bias",
            Self::Moderate => "moderate popularity bias",
            Self::Low => "low bias",
            Self::TowardLessPopular => "bias toward less-popular items",
        }
    }
}

impl fmt::Display for PopularityBiasLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityBias {
    /// Signed percentage over the catalog mean
    pub bias: f64,
    pub catalog_avg: f64,
    pub recommendation_avg: f64,
    pub interpretation: PopularityBiasLevel,
}

/// How far recommended popularity sits above the catalog mean, in percent
///
/// An empty catalog or a zero catalog mean yields a bias of 0.
pub fn popularity_bias(set: &RecommendationSet, corpus: &Corpus) -> PopularityBias {
    let items = corpus.items();
    let catalog_avg = if items.is_empty() {
        0.0
    } else {
        items.iter().map(|item| item.popularity()).sum::<f64>() / items.len() as f64
    };

    let (total, count) = set
        .recommendations()
        .fold((0.0, 0usize), |(total, count), rec| {
            (total + rec.item.popularity(), count + 1)
        });
    let recommendation_avg = if count > 0 { total / count as f64 } else { 0.0 };

    let bias = if catalog_avg > 0.0 {
        (recommendation_avg - catalog_avg) / catalog_avg * 100.0
    } else {
        0.0
    };

    PopularityBias {
        bias,
        catalog_avg,
        recommendation_avg,
        interpretation: PopularityBiasLevel::from_bias(bias),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RepresentationBalance {
    #[serde(rename = "balanced")]
    Balanced,
    #[serde(rename = "self-representation bias")]
    SelfRepresentation,
    #[serde(rename = "bias toward other-representation")]
    OtherRepresentation,
}

impl RepresentationBalance {
    pub fn from_self_rate(self_rate: f64) -> Self {
        if (self_rate - 50.0).abs() < 10.0 {
            Self::Balanced
        } else if self_rate > 60.0 {
            Self::SelfRepresentation
        } else {
            Self::OtherRepresentation
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRepresentation {
    pub self_representation: f64,
    pub other_representation: f64,
    /// `selfRate − 50`
    pub bias: f64,
    pub interpretation: RepresentationBalance,
}

pub type DemographicBias = BTreeMap<Dimension, BTreeMap<String, GroupRepresentation>>;

#[derive(Default)]
struct Tally {
    own: usize,
    other: usize,
}

/// Self-representation rate per demographic group
///
/// Every (cast tag, recommendation) pair of a group's users is classified.
/// A tag is "self" when it contains the user's ethnicity as a substring; on
/// the gender dimension a tag containing the user's gender also counts. The
/// ethnicity check applies on every dimension, so an ethnicity match raises
/// the gender and age self-rates too.
pub fn demographic_bias(set: &RecommendationSet, corpus: &Corpus) -> DemographicBias {
    let mut tallies: BTreeMap<Dimension, BTreeMap<String, Tally>> = BTreeMap::new();

    for (user_id, recs) in set {
        let Some(user) = corpus.user(*user_id) else {
            continue;
        };
        let demographics = &user.demographics;

        for rec in recs {
            for tag in &rec.item.metadata.cast_diversity {
                for dimension in Dimension::CORE {
                    let group = dimension.group_of(demographics).to_string();
                    let tally = tallies.entry(dimension).or_default().entry(group).or_default();

                    let is_self = tag.contains(demographics.ethnicity.as_str())
                        || (dimension == Dimension::Gender
                            && tag.contains(demographics.gender.as_str()));
                    if is_self {
                        tally.own += 1;
                    } else {
                        tally.other += 1;
                    }
                }
            }
        }
    }

    Dimension::CORE
        .into_iter()
        .map(|dimension| {
            let groups = tallies
                .remove(&dimension)
                .unwrap_or_default()
                .into_iter()
                .map(|(group, tally)| {
                    let total = tally.own + tally.other;
                    let (self_rate, other_rate) = if total > 0 {
                        (
                            tally.own as f64 / total as f64 * 100.0,
                            tally.other as f64 / total as f64 * 100.0,
                        )
                    } else {
                        (0.0, 0.0)
                    };

                    let representation = GroupRepresentation {
                        self_representation: self_rate,
                        other_representation: other_rate,
                        bias: self_rate - 50.0,
                        interpretation: RepresentationBalance::from_self_rate(self_rate),
                    };
                    (group, representation)
                })
                .collect();
            (dimension, groups)
        })
        .collect()
}
