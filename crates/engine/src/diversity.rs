//! Diversity Filter using Maximal Marginal Relevance (MMR)
//!
//! Greedy selection that trades rank for genre variety: each pick maximises
//! `score × (1 − penalty × overlap / genres)`, where `overlap` counts the
//! candidate's genres already present in the selection.

use crate::recommender::sort_by_score_desc;
use crate::types::ScoredCandidate;
use std::collections::HashSet;

/// Only the top unselected candidates are examined per pick
pub const CANDIDATE_WINDOW: usize = 50;

/// Apply diversified selection
///
/// Steps:
/// 1. Sort candidates by score (stable, descending)
/// 2. Examine the top `CANDIDATE_WINDOW` remaining candidates
/// 3. Pick the one maximising score × diversity multiplier, earliest on ties
/// 4. Repeat until `limit` picks or the pool is exhausted
pub struct ApplyDiversityFilter;

impl ApplyDiversityFilter {
    pub fn execute(
        mut candidates: Vec<ScoredCandidate>,
        repetition_penalty: f64,
        limit: usize,
    ) -> Vec<ScoredCandidate> {
        sort_by_score_desc(&mut candidates);

        let mut selected: Vec<ScoredCandidate> = Vec::with_capacity(limit.min(candidates.len()));
        let mut selected_genres: HashSet<String> = HashSet::new();
        let mut remaining = candidates;

        while selected.len() < limit && !remaining.is_empty() {
            let window = remaining.len().min(CANDIDATE_WINDOW);
            let mut best_score = f64::NEG_INFINITY;
            let mut best_index = None;

            for (index, candidate) in remaining[..window].iter().enumerate() {
                let multiplier = if selected.is_empty() {
                    1.0
                } else {
                    Self::diversity_multiplier(candidate, &selected_genres, repetition_penalty)
                };

                let mmr_score = candidate.score * multiplier;
                if mmr_score > best_score {
                    best_score = mmr_score;
                    best_index = Some(index);
                }
            }

            let Some(index) = best_index else {
                break;
            };

            let chosen = remaining.remove(index);
            selected_genres.extend(chosen.item.genres.iter().cloned());
            selected.push(chosen);
        }

        selected
    }

    fn diversity_multiplier(
        candidate: &ScoredCandidate,
        selected_genres: &HashSet<String>,
        repetition_penalty: f64,
    ) -> f64 {
        let genres: HashSet<&String> = candidate.item.genres.iter().collect();
        if genres.is_empty() {
            return 1.0;
        }

        let overlap = genres.iter().filter(|g| selected_genres.contains(**g)).count();
        1.0 - (overlap as f64 / genres.len() as f64) * repetition_penalty
    }
}
