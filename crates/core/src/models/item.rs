//! Content models for the recommendation experiment

use serde::{Deserialize, Serialize};

/// Item identifier
pub type ItemId = u64;

/// Cast-diversity tag marking representation of people with disabilities
pub const DISABILITY_REPRESENTATION_TAG: &str = "pessoas com deficiência";

/// Accessibility features an item supports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityFlags {
    #[serde(default)]
    pub subtitles: bool,
    #[serde(default)]
    pub audio_description: bool,
    #[serde(default)]
    pub sign_language: bool,
}

/// Descriptive metadata of an item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default)]
    pub year: u16,

    #[serde(default)]
    pub director: String,

    /// Represented groups in the cast
    #[serde(default)]
    pub cast_diversity: Vec<String>,

    #[serde(default)]
    pub cultural_representation: Vec<String>,

    /// Popularity in [0, 100]
    #[serde(default)]
    pub popularity: f64,

    #[serde(default)]
    pub accessibility: AccessibilityFlags,

    #[serde(default)]
    pub themes: Vec<String>,
}

/// A catalog item (film, series, documentary...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,

    #[serde(default)]
    pub title: String,

    #[serde(rename = "type", default)]
    pub item_type: String,

    pub genres: Vec<String>,

    #[serde(default)]
    pub metadata: ItemMetadata,
}

impl Item {
    pub fn popularity(&self) -> f64 {
        self.metadata.popularity
    }

    pub fn has_cast_tag(&self, tag: &str) -> bool {
        self.metadata.cast_diversity.iter().any(|t| t == tag)
    }
}
