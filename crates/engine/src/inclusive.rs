//! Inclusive Recommendation Engine
//!
//! Multi-objective variant of the collaborative recommender. Candidates are
//! scored on four independent terms (collaborative/popularity base,
//! relevance, accessibility, representation) and the final list is picked by
//! genre-diversified MMR selection.
//!
//! Steps:
//! 1. Find the 15 most similar users with a blended score that rewards
//!    demographic difference, so neighbours are not an echo chamber
//! 2. Score every unseen catalog item
//! 3. Apply the diversity filter

use crate::cache::{Neighborhood, SimilarityCache};
use crate::diversity::ApplyDiversityFilter;
use crate::recommender::{rank_neighbors, Recommender};
use crate::scoring::{accessibility_score, calculate_relevance_score, representation_score};
use crate::types::{Algorithm, Recommendation, ScoreBreakdown, ScoredCandidate};
use fairrec_core::{history_similarity, set_similarity, Corpus, ItemId, Parameters, User, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const INCLUSIVE_NEIGHBORS: usize = 15;

const HISTORY_SIMILARITY_WEIGHT: f64 = 0.5;
const PREFERENCE_SIMILARITY_WEIGHT: f64 = 0.3;
const DEMOGRAPHIC_BONUS_WEIGHT: f64 = 0.2;
const DEMOGRAPHIC_DIFFERENCE_BONUS: f64 = 0.1;

const COLLABORATIVE_WEIGHT: f64 = 0.5;
const POPULARITY_WEIGHT: f64 = 0.5;
const RELEVANCE_WEIGHT: f64 = 0.3;

/// Inclusive recommender configuration
///
/// Values are used as given; see [`Parameters::validate`] for the documented
/// ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InclusiveConfig {
    /// Weight moved away from the base term (default: 0.3)
    pub diversity_weight: f64,
    /// Multiplier of the accessibility term (default: 0.2)
    pub accessibility_weight: f64,
    /// Multiplier of the representation term (default: 0.2)
    pub representation_weight: f64,
    /// Genre-overlap penalty strength during selection (default: 0.5)
    pub repetition_penalty: f64,
}

impl Default for InclusiveConfig {
    fn default() -> Self {
        Parameters::default().into()
    }
}

impl From<Parameters> for InclusiveConfig {
    fn from(params: Parameters) -> Self {
        Self {
            diversity_weight: params.diversity_weight,
            accessibility_weight: params.accessibility_weight,
            representation_weight: params.representation_weight,
            repetition_penalty: params.repetition_penalty,
        }
    }
}

pub struct InclusiveRecommender {
    corpus: Arc<Corpus>,
    config: InclusiveConfig,
    cache: SimilarityCache,
}

impl InclusiveRecommender {
    pub fn new(corpus: Arc<Corpus>, config: InclusiveConfig) -> Self {
        Self {
            corpus,
            config,
            cache: SimilarityCache::new(),
        }
    }

    pub fn with_default_config(corpus: Arc<Corpus>) -> Self {
        Self::new(corpus, InclusiveConfig::default())
    }

    pub fn config(&self) -> &InclusiveConfig {
        &self.config
    }

    pub fn cache(&self) -> &SimilarityCache {
        &self.cache
    }

    /// Top-k users by blended similarity, cached per target user
    pub fn find_similar_users(&self, target: &User) -> Neighborhood {
        self.cache.get_or_compute(target.id, || {
            rank_neighbors(&self.corpus, target, INCLUSIVE_NEIGHBORS, |other| {
                Self::blended_similarity(target, other)
            })
        })
    }

    /// `0.5 × history + 0.3 × genre-preference Jaccard + 0.2 × demographic bonus`
    pub fn blended_similarity(target: &User, other: &User) -> f64 {
        let history = history_similarity(&target.history, &other.history);
        let preferences = set_similarity(&target.preferences.genres, &other.preferences.genres);

        let (a, b) = (&target.demographics, &other.demographics);
        let differing = [
            a.gender != b.gender,
            a.age != b.age,
            a.ethnicity != b.ethnicity,
        ]
        .into_iter()
        .filter(|differs| *differs)
        .count();
        let demographic_bonus = differing as f64 * DEMOGRAPHIC_DIFFERENCE_BONUS;

        history * HISTORY_SIMILARITY_WEIGHT
            + preferences * PREFERENCE_SIMILARITY_WEIGHT
            + demographic_bonus * DEMOGRAPHIC_BONUS_WEIGHT
    }

    /// Composite scores for every unseen item, in catalog order
    pub fn score_candidates(&self, user: &User) -> Vec<ScoredCandidate> {
        let seen: HashSet<ItemId> = user.history.iter().copied().collect();
        let collaborative = self.collaborative_scores(user, &seen);

        self.corpus
            .items()
            .iter()
            .filter(|item| !seen.contains(&item.id))
            .map(|item| {
                let collab_score = collaborative.get(&item.id).copied().unwrap_or(0.0);
                let base_score = collab_score * COLLABORATIVE_WEIGHT
                    + item.popularity() / 100.0 * POPULARITY_WEIGHT;
                let relevance_score = calculate_relevance_score(user, item) / 100.0;
                let accessibility_score = accessibility_score(user, item);
                let representation_score = representation_score(user, item);

                let score = base_score * (1.0 - self.config.diversity_weight)
                    + relevance_score * RELEVANCE_WEIGHT
                    + accessibility_score * self.config.accessibility_weight
                    + representation_score * self.config.representation_weight;

                ScoredCandidate {
                    item: Arc::clone(item),
                    score,
                    breakdown: Some(ScoreBreakdown {
                        base_score,
                        relevance_score,
                        accessibility_score,
                        representation_score,
                    }),
                }
            })
            .collect()
    }

    /// Sum of neighbour similarities per unseen catalog item
    fn collaborative_scores(&self, user: &User, seen: &HashSet<ItemId>) -> HashMap<ItemId, f64> {
        let users = self.corpus.users();
        let mut scores = HashMap::new();

        for neighbor in self.find_similar_users(user).iter() {
            for item_id in &users[neighbor.user_position].history {
                if seen.contains(item_id) || self.corpus.item(*item_id).is_none() {
                    continue;
                }
                *scores.entry(*item_id).or_insert(0.0) += neighbor.similarity;
            }
        }

        scores
    }
}

impl Recommender for InclusiveRecommender {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Inclusive
    }

    fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    fn recommend(&self, user_id: UserId, n: usize) -> Vec<Recommendation> {
        let Some(user) = self.corpus.user(user_id) else {
            return Vec::new();
        };

        let candidates = self.score_candidates(user);
        ApplyDiversityFilter::execute(candidates, self.config.repetition_penalty, n)
            .into_iter()
            .map(|candidate| candidate.into_recommendation(user_id, Algorithm::Inclusive))
            .collect()
    }
}
