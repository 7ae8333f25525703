//! Recommendation output types

use fairrec_core::{Item, ItemId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::sync::Arc;

/// Which recommender produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Baseline,
    Inclusive,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => f.write_str("baseline"),
            Self::Inclusive => f.write_str("inclusive"),
        }
    }
}

/// Individual terms of an inclusive composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub base_score: f64,
    pub relevance_score: f64,
    pub accessibility_score: f64,
    pub representation_score: f64,
}

/// One recommended item for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub item: Arc<Item>,
    pub score: f64,
    pub algorithm: Algorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

/// Candidate carried through scoring and diversified selection
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub item: Arc<Item>,
    pub score: f64,
    pub breakdown: Option<ScoreBreakdown>,
}

impl ScoredCandidate {
    pub fn into_recommendation(self, user_id: UserId, algorithm: Algorithm) -> Recommendation {
        Recommendation {
            user_id,
            item_id: self.item.id,
            item: self.item,
            score: self.score,
            algorithm,
            breakdown: self.breakdown,
        }
    }
}

/// userId → ordered recommendation list
///
/// Order within each list is significant; order across users is not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecommendationSet {
    lists: BTreeMap<UserId, Vec<Recommendation>>,
}

impl RecommendationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user_id: UserId, recommendations: Vec<Recommendation>) {
        self.lists.insert(user_id, recommendations);
    }

    pub fn get(&self, user_id: UserId) -> Option<&[Recommendation]> {
        self.lists.get(&user_id).map(Vec::as_slice)
    }

    /// The user's list, or an empty slice when the user has none
    pub fn list_for(&self, user_id: UserId) -> &[Recommendation] {
        self.get(user_id).unwrap_or(&[])
    }

    pub fn iter(&self) -> btree_map::Iter<'_, UserId, Vec<Recommendation>> {
        self.lists.iter()
    }

    /// Every recommendation across all users
    pub fn recommendations(&self) -> impl Iterator<Item = &Recommendation> {
        self.lists.values().flatten()
    }

    pub fn user_count(&self) -> usize {
        self.lists.len()
    }

    pub fn total_recommendations(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl FromIterator<(UserId, Vec<Recommendation>)> for RecommendationSet {
    fn from_iter<I: IntoIterator<Item = (UserId, Vec<Recommendation>)>>(iter: I) -> Self {
        Self {
            lists: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<UserId, Vec<Recommendation>>> for RecommendationSet {
    fn from(lists: BTreeMap<UserId, Vec<Recommendation>>) -> Self {
        Self { lists }
    }
}

impl<'a> IntoIterator for &'a RecommendationSet {
    type Item = (&'a UserId, &'a Vec<Recommendation>);
    type IntoIter = btree_map::Iter<'a, UserId, Vec<Recommendation>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lists.iter()
    }
}
