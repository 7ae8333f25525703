//! Per-recommender neighbour cache
//!
//! Write-once memo keyed by target user. Entries are never evicted or
//! invalidated: the corpus is immutable for the recommender's lifetime, so a
//! fresh recommender instance is the only way to start over.

use dashmap::DashMap;
use fairrec_core::UserId;
use std::sync::Arc;

/// A similar user, referenced by position in the corpus load order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub user_position: usize,
    pub similarity: f64,
}

pub type Neighborhood = Arc<[Neighbor]>;

/// Owned similarity cache, one per recommender instance
#[derive(Debug, Default)]
pub struct SimilarityCache {
    entries: DashMap<UserId, Neighborhood>,
}

impl SimilarityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached neighbourhood, computing it on first access
    ///
    /// `compute` is deterministic for a fixed corpus, so a concurrent
    /// duplicate computation for the same key yields an identical value.
    pub fn get_or_compute<F>(&self, user_id: UserId, compute: F) -> Neighborhood
    where
        F: FnOnce() -> Vec<Neighbor>,
    {
        if let Some(hit) = self.entries.get(&user_id) {
            return Arc::clone(hit.value());
        }

        let neighborhood: Neighborhood = compute().into();
        Arc::clone(
            self.entries
                .entry(user_id)
                .or_insert(neighborhood)
                .value(),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.entries.contains_key(&user_id)
    }
}
