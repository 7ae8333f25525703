//! Per-item scoring terms for the inclusive recommender
//!
//! Each function scores one (user, item) pair independently of any other
//! candidate, so a composite score is reproducible from its inputs alone.

use fairrec_core::{AccessibilityNeed, Item, User, DISABILITY_REPRESENTATION_TAG};

const GENRE_MATCH_POINTS: f64 = 40.0;
const POPULARITY_POINTS: f64 = 30.0;
const CULTURAL_MATCH_POINTS: f64 = 20.0;
const NOVELTY_POINTS: f64 = 10.0;

const ACCESSIBILITY_BASELINE: f64 = 1.0;
const AUDIO_DESCRIPTION_BONUS: f64 = 0.5;
const SUBTITLES_BONUS: f64 = 0.3;
const SIGN_LANGUAGE_BONUS: f64 = 0.5;
const ACCESSIBILITY_CAP: f64 = 2.0;

const CAST_MATCH_BONUS: f64 = 0.4;
const CULTURE_MATCH_BONUS: f64 = 0.3;
const DISABILITY_MATCH_BONUS: f64 = 0.3;

/// Relevance on a 0-100 scale
///
/// Weights:
/// - 40: fraction of the user's preferred genres the item carries
/// - 30: item popularity scaled from 0-100
/// - 20: any cultural interest appears in the item's cultural representation
/// - 10: item is absent from the user's history
///
/// A user with no preferred genres scores 0 on the genre term.
pub fn calculate_relevance_score(user: &User, item: &Item) -> f64 {
    let preferred = &user.preferences.genres;

    let mut score = 0.0;

    if !preferred.is_empty() {
        let matched = preferred.iter().filter(|g| item.genres.contains(g)).count();
        score += matched as f64 / preferred.len() as f64 * GENRE_MATCH_POINTS;
    }

    score += item.popularity() / 100.0 * POPULARITY_POINTS;

    let cultural_match = user
        .preferences
        .cultural_interests
        .iter()
        .any(|interest| item.metadata.cultural_representation.contains(interest));
    if cultural_match {
        score += CULTURAL_MATCH_POINTS;
    }

    if !user.history.contains(&item.id) {
        score += NOVELTY_POINTS;
    }

    score
}

/// Accessibility fit in [1.0, 2.0]
///
/// Users without needs score the 1.0 baseline. Otherwise each declared need
/// the item supports adds its bonus.
pub fn accessibility_score(user: &User, item: &Item) -> f64 {
    if !user.has_accessibility_needs() {
        return ACCESSIBILITY_BASELINE;
    }

    let flags = &item.metadata.accessibility;
    let mut score = ACCESSIBILITY_BASELINE;

    if user.declares(&AccessibilityNeed::AudioDescription) && flags.audio_description {
        score += AUDIO_DESCRIPTION_BONUS;
    }
    if user.declares(&AccessibilityNeed::Subtitles) && flags.subtitles {
        score += SUBTITLES_BONUS;
    }
    if user.declares(&AccessibilityNeed::SignLanguage) && flags.sign_language {
        score += SIGN_LANGUAGE_BONUS;
    }

    score.min(ACCESSIBILITY_CAP)
}

/// How well the item represents the user, in [0.0, 1.0]
pub fn representation_score(user: &User, item: &Item) -> f64 {
    let ethnicity = user.demographics.ethnicity.as_str();
    let metadata = &item.metadata;
    let mut score = 0.0;

    if metadata.cast_diversity.iter().any(|tag| tag == ethnicity) {
        score += CAST_MATCH_BONUS;
    }

    if metadata
        .cultural_representation
        .iter()
        .any(|culture| culture.contains(ethnicity))
    {
        score += CULTURE_MATCH_BONUS;
    }

    if user.demographics.has_disability() && item.has_cast_tag(DISABILITY_REPRESENTATION_TAG) {
        score += DISABILITY_MATCH_BONUS;
    }

    score
}
