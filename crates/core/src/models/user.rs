//! User models for the recommendation experiment
//!
//! This module contains the user record, its demographic attributes and the
//! preferences the inclusive scoring reads.

use crate::models::item::{AccessibilityFlags, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier
pub type UserId = u64;

/// Demographic attributes of a user
///
/// Immutable after creation. Grouping dimensions used by the equity and bias
/// metrics are `gender`, `age` (bracket), `ethnicity`, `disability` and
/// `socioeconomic`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub gender: String,

    /// Age bracket (e.g. "jovem", "adulto", "idoso")
    pub age: String,

    /// Numeric age
    #[serde(rename = "ageValue", alias = "age_value", default)]
    pub age_value: u32,

    pub ethnicity: String,

    #[serde(default)]
    pub region: String,

    /// Disability, or `None` when the user declares none
    #[serde(default)]
    pub disability: Option<String>,

    #[serde(default)]
    pub socioeconomic: String,
}

impl Demographics {
    /// Whether the user declares a disability
    pub fn has_disability(&self) -> bool {
        self.disability.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Disability bucket used for grouping, with a literal "none" bucket
    pub fn disability_group(&self) -> &str {
        match self.disability.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "none",
        }
    }
}

/// Declared accessibility need
///
/// Only the first three kinds constrain which items satisfy a user. Any other
/// declared need still marks the user as having needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessibilityNeed {
    AudioDescription,
    Subtitles,
    SignLanguage,
    Other(String),
}

impl AccessibilityNeed {
    /// Whether an item with the given flags satisfies this need
    pub fn is_met_by(&self, flags: &AccessibilityFlags) -> bool {
        match self {
            Self::AudioDescription => flags.audio_description,
            Self::Subtitles => flags.subtitles,
            Self::SignLanguage => flags.sign_language,
            Self::Other(_) => true,
        }
    }
}

impl From<String> for AccessibilityNeed {
    fn from(raw: String) -> Self {
        let normalized = raw.trim().to_lowercase();
        if normalized.contains("audiodescrição")
            || normalized.contains("audio_description")
            || normalized.contains("audio description")
        {
            Self::AudioDescription
        } else if normalized.contains("legendas") || normalized.contains("subtitles") {
            Self::Subtitles
        } else if normalized.contains("libras")
            || normalized.contains("sign_language")
            || normalized.contains("sign language")
        {
            Self::SignLanguage
        } else {
            Self::Other(raw)
        }
    }
}

impl From<&str> for AccessibilityNeed {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<AccessibilityNeed> for String {
    fn from(need: AccessibilityNeed) -> Self {
        need.to_string()
    }
}

impl fmt::Display for AccessibilityNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AudioDescription => f.write_str("audio_description"),
            Self::Subtitles => f.write_str("subtitles"),
            Self::SignLanguage => f.write_str("sign_language"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// User preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub genres: Vec<String>,

    #[serde(default)]
    pub languages: Vec<String>,

    #[serde(default)]
    pub accessibility_needs: Vec<AccessibilityNeed>,

    #[serde(default)]
    pub cultural_interests: Vec<String>,
}

/// A user of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    #[serde(default)]
    pub name: String,

    pub demographics: Demographics,

    #[serde(default)]
    pub preferences: Preferences,

    /// Items already consumed, in consumption order
    #[serde(default)]
    pub history: Vec<ItemId>,
}

impl User {
    pub fn has_accessibility_needs(&self) -> bool {
        !self.preferences.accessibility_needs.is_empty()
    }

    /// Whether the item satisfies every declared accessibility need
    pub fn needs_met_by(&self, flags: &AccessibilityFlags) -> bool {
        self.preferences
            .accessibility_needs
            .iter()
            .all(|need| need.is_met_by(flags))
    }

    pub fn declares(&self, need: &AccessibilityNeed) -> bool {
        self.preferences.accessibility_needs.contains(need)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessibility_need_parsing() {
        assert_eq!(
            AccessibilityNeed::from("audiodescrição"),
            AccessibilityNeed::AudioDescription
        );
        assert_eq!(AccessibilityNeed::from("legendas"), AccessibilityNeed::Subtitles);
        assert_eq!(AccessibilityNeed::from("Libras"), AccessibilityNeed::SignLanguage);
        assert_eq!(
            AccessibilityNeed::from("subtitles"),
            AccessibilityNeed::Subtitles
        );
        assert_eq!(
            AccessibilityNeed::from("volume alto"),
            AccessibilityNeed::Other("volume alto".to_string())
        );
    }

    #[test]
    fn test_other_need_never_constrains() {
        let flags = AccessibilityFlags::default();
        assert!(AccessibilityNeed::from("interface simplificada").is_met_by(&flags));
        assert!(!AccessibilityNeed::Subtitles.is_met_by(&flags));
    }

    #[test]
    fn test_user_deserializes_dataset_shape() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 4,
            "name": "Maria Oliveira",
            "demographics": {
                "gender": "feminino",
                "age": "adulto",
                "ageValue": 38,
                "ethnicity": "branca",
                "region": "Sul",
                "disability": "visual",
                "socioeconomic": "média"
            },
            "preferences": {
                "genres": ["drama", "biografia", "musical"],
                "languages": ["português"],
                "accessibility_needs": ["audiodescrição", "legendas"],
                "cultural_interests": ["música clássica", "teatro"]
            },
            "history": [4, 11, 22]
        }))
        .unwrap();

        assert_eq!(user.demographics.age_value, 38);
        assert!(user.demographics.has_disability());
        assert_eq!(
            user.preferences.accessibility_needs,
            vec![AccessibilityNeed::AudioDescription, AccessibilityNeed::Subtitles]
        );
        assert_eq!(user.history, vec![4, 11, 22]);
    }

    #[test]
    fn test_missing_disability_maps_to_none_bucket() {
        let demographics = Demographics {
            gender: "masculino".to_string(),
            age: "jovem".to_string(),
            age_value: 25,
            ethnicity: "negro".to_string(),
            region: "Nordeste".to_string(),
            disability: None,
            socioeconomic: "baixa".to_string(),
        };
        assert!(!demographics.has_disability());
        assert_eq!(demographics.disability_group(), "none");
    }
}
