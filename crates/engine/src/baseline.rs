//! Baseline Collaborative Filtering
//!
//! User-user collaborative filtering over raw history overlap, weighted by
//! item popularity. There is no diversity control: popular items dominate,
//! which is exactly the behaviour the experiment measures against.

use crate::cache::{Neighborhood, SimilarityCache};
use crate::recommender::{rank_neighbors, sort_by_score_desc, Recommender};
use crate::types::{Algorithm, Recommendation, ScoredCandidate};
use fairrec_core::{history_similarity, Corpus, Item, ItemId, User, UserId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const BASELINE_NEIGHBORS: usize = 10;
const FALLBACK_POPULARITY_WEIGHT: f64 = 0.5;

/// Popularity-weighted collaborative recommender
pub struct BaselineRecommender {
    corpus: Arc<Corpus>,
    cache: SimilarityCache,
}

impl BaselineRecommender {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self {
            corpus,
            cache: SimilarityCache::new(),
        }
    }

    /// Top-k users by history similarity, cached per target user
    pub fn find_similar_users(&self, target: &User) -> Neighborhood {
        self.cache.get_or_compute(target.id, || {
            rank_neighbors(&self.corpus, target, BASELINE_NEIGHBORS, |other| {
                history_similarity(&target.history, &other.history)
            })
        })
    }

    pub fn cache(&self) -> &SimilarityCache {
        &self.cache
    }
}

impl Recommender for BaselineRecommender {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Baseline
    }

    fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    fn recommend(&self, user_id: UserId, n: usize) -> Vec<Recommendation> {
        let Some(user) = self.corpus.user(user_id) else {
            return Vec::new();
        };

        let seen: HashSet<ItemId> = user.history.iter().copied().collect();
        let neighbors = self.find_similar_users(user);
        let users = self.corpus.users();

        let mut pool = CandidatePool::default();

        // Collaborative: similarity × popularity per contributing neighbour
        for neighbor in neighbors.iter() {
            for item_id in &users[neighbor.user_position].history {
                if seen.contains(item_id) {
                    continue;
                }
                let Some(item) = self.corpus.item(*item_id) else {
                    continue;
                };
                pool.accumulate(item, neighbor.similarity * item.popularity());
            }
        }

        // Fallback: every other unseen item on popularity alone
        for item in self.corpus.items() {
            if seen.contains(&item.id) || pool.contains(item.id) {
                continue;
            }
            pool.accumulate(item, item.popularity() * FALLBACK_POPULARITY_WEIGHT);
        }

        let mut ranked = pool.into_candidates();
        sort_by_score_desc(&mut ranked);
        ranked.truncate(n);

        ranked
            .into_iter()
            .map(|candidate| candidate.into_recommendation(user_id, Algorithm::Baseline))
            .collect()
    }
}

/// Insertion-ordered score accumulator
#[derive(Default)]
struct CandidatePool {
    candidates: Vec<ScoredCandidate>,
    positions: HashMap<ItemId, usize>,
}

impl CandidatePool {
    fn accumulate(&mut self, item: &Arc<Item>, score: f64) {
        match self.positions.get(&item.id) {
            Some(&position) => self.candidates[position].score += score,
            None => {
                self.positions.insert(item.id, self.candidates.len());
                self.candidates.push(ScoredCandidate {
                    item: Arc::clone(item),
                    score,
                    breakdown: None,
                });
            }
        }
    }

    fn contains(&self, item_id: ItemId) -> bool {
        self.positions.contains_key(&item_id)
    }

    fn into_candidates(self) -> Vec<ScoredCandidate> {
        self.candidates
    }
}
