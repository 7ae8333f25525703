//! Set-based similarity
//!
//! Pure functions over membership sets. Duplicated entries in the inputs are
//! collapsed before comparison.

use std::collections::HashSet;
use std::hash::Hash;

/// Cosine similarity over binary membership vectors
///
/// `|A ∩ B| / sqrt(|A| * |B|)`, or 0 when either set is empty.
pub fn history_similarity<T: Eq + Hash>(a: &[T], b: &[T]) -> f64 {
    let set_a: HashSet<&T> = a.iter().collect();
    let set_b: HashSet<&T> = b.iter().collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / ((set_a.len() * set_b.len()) as f64).sqrt()
}

/// Jaccard similarity: `|A ∩ B| / |A ∪ B|`, or 0 when the union is empty
pub fn set_similarity<T: Eq + Hash>(a: &[T], b: &[T]) -> f64 {
    let set_a: HashSet<&T> = a.iter().collect();
    let set_b: HashSet<&T> = b.iter().collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }

    set_a.intersection(&set_b).count() as f64 / union as f64
}
