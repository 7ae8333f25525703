//! Accessibility: do users with declared needs get content they can use?

use crate::types::{Recommendation, RecommendationSet};
use fairrec_core::{AccessibilityNeed, Corpus};
use serde::Serialize;

/// Share of a list that must satisfy a need for the user to count as served
pub const SATISFIED_SHARE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityCoverage {
    /// 0-100, or 100 when no user declares needs
    pub coverage: f64,
    pub users_with_needs: usize,
    pub users_covered: usize,
}

/// Users whose list satisfies all of their declared needs
///
/// A user is covered when at least 70% of their recommendations meet every
/// declared need. An empty or missing list never covers.
pub fn accessibility_coverage(set: &RecommendationSet, corpus: &Corpus) -> AccessibilityCoverage {
    let mut users_with_needs = 0;
    let mut users_covered = 0;

    for user in corpus.users().iter().filter(|u| u.has_accessibility_needs()) {
        users_with_needs += 1;

        let recs = set.list_for(user.id);
        if satisfies_share(recs, |rec| user.needs_met_by(&rec.item.metadata.accessibility)) {
            users_covered += 1;
        }
    }

    let coverage = if users_with_needs > 0 {
        users_covered as f64 / users_with_needs as f64 * 100.0
    } else {
        100.0
    };

    AccessibilityCoverage {
        coverage,
        users_with_needs,
        users_covered,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeedMatch {
    /// 0-100, or 0 when nobody requested the need
    pub match_rate: f64,
    pub requested: usize,
    pub fulfilled: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityMatchRate {
    pub audio_description: NeedMatch,
    pub subtitles: NeedMatch,
    pub sign_language: NeedMatch,
}

impl AccessibilityMatchRate {
    fn slot(&mut self, need: &AccessibilityNeed) -> Option<&mut NeedMatch> {
        match need {
            AccessibilityNeed::AudioDescription => Some(&mut self.audio_description),
            AccessibilityNeed::Subtitles => Some(&mut self.subtitles),
            AccessibilityNeed::SignLanguage => Some(&mut self.sign_language),
            AccessibilityNeed::Other(_) => None,
        }
    }
}

/// Per-need fulfilment over every declared (user, need) pair
///
/// A pair is fulfilled when at least 70% of the user's list supports that
/// need. An empty or missing list never fulfils, matching the coverage rule
/// above rather than treating `0 >= 0` as a pass. Needs outside the three
/// known kinds are not tracked.
pub fn accessibility_match_rate(set: &RecommendationSet, corpus: &Corpus) -> AccessibilityMatchRate {
    let mut rates = AccessibilityMatchRate::default();

    for user in corpus.users() {
        let recs = set.list_for(user.id);

        for need in &user.preferences.accessibility_needs {
            let Some(slot) = rates.slot(need) else {
                continue;
            };
            slot.requested += 1;
            if satisfies_share(recs, |rec| need.is_met_by(&rec.item.metadata.accessibility)) {
                slot.fulfilled += 1;
            }
        }
    }

    for slot in [
        &mut rates.audio_description,
        &mut rates.subtitles,
        &mut rates.sign_language,
    ] {
        if slot.requested > 0 {
            slot.match_rate = slot.fulfilled as f64 / slot.requested as f64 * 100.0;
        }
    }

    rates
}

fn satisfies_share<F>(recs: &[Recommendation], predicate: F) -> bool
where
    F: Fn(&Recommendation) -> bool,
{
    if recs.is_empty() {
        return false;
    }
    let matching = recs.iter().filter(|rec| predicate(rec)).count();
    matching as f64 / recs.len() as f64 >= SATISFIED_SHARE
}
