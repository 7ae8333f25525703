//! Common recommender interface and neighbour ranking

use crate::cache::Neighbor;
use crate::types::{Algorithm, Recommendation, RecommendationSet, ScoredCandidate};
use fairrec_core::{Corpus, User, UserId};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// A recommender bound to one immutable corpus
pub trait Recommender: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    fn corpus(&self) -> &Corpus;

    /// Up to `n` recommendations for `user_id`, best first
    ///
    /// Unknown users get an empty list. Items already in the user's history
    /// are never returned and no item appears twice.
    fn recommend(&self, user_id: UserId, n: usize) -> Vec<Recommendation>;

    /// Recommend for every corpus user
    ///
    /// Users are processed independently across the rayon pool; each list
    /// keeps the order produced by [`Recommender::recommend`].
    #[instrument(skip(self), fields(algorithm = %self.algorithm()))]
    fn recommend_for_all(&self, n: usize) -> RecommendationSet {
        let lists: BTreeMap<UserId, Vec<Recommendation>> = self
            .corpus()
            .users()
            .par_iter()
            .map(|user| (user.id, self.recommend(user.id, n)))
            .collect();

        let set = RecommendationSet::from(lists);
        info!(
            users = set.user_count(),
            recommendations = set.total_recommendations(),
            "Generated recommendations for all users"
        );
        set
    }
}

/// Descending by score, keeping encounter order among equal scores
pub(crate) fn sort_by_score_desc(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// The `k` users most similar to `target`, best first
///
/// Candidates are scanned in corpus order and the sort is stable, so equal
/// similarities keep load order.
pub(crate) fn rank_neighbors<F>(corpus: &Corpus, target: &User, k: usize, similarity: F) -> Vec<Neighbor>
where
    F: Fn(&User) -> f64,
{
    let mut neighbors: Vec<Neighbor> = corpus
        .users()
        .iter()
        .enumerate()
        .filter(|(_, other)| other.id != target.id)
        .map(|(user_position, other)| Neighbor {
            user_position,
            similarity: similarity(other),
        })
        .collect();

    neighbors.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    neighbors.truncate(k);
    neighbors
}
