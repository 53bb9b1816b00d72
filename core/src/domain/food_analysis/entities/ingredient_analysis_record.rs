use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::food_analysis_record::{deserialize_text, unknown};

/// Structured result of a single-ingredient analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientAnalysisRecord {
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub pronunciation: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub commonly_found_in: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub purpose: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub natural_or_synthetic: String,
    /// Starts with a [`SafetyLevel`] glyph.
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub safety_status: String,
    /// Starts with a [`SafetyLevel`] glyph.
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub health_concerns: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub recommended_intake: String,
}

impl IngredientAnalysisRecord {
    pub fn safety_level(&self) -> Option<SafetyLevel> {
        SafetyLevel::from_rating(&self.safety_status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    Safe,
    Caution,
    Danger,
}

impl SafetyLevel {
    pub const fn glyph(self) -> &'static str {
        match self {
            SafetyLevel::Safe => "✅",
            SafetyLevel::Caution => "⚠️",
            SafetyLevel::Danger => "❌",
        }
    }

    /// Reads a rating either from its leading glyph (`"⚠️ Caution: ..."`) or
    /// from a plain word (`"danger"`, `"unsafe"`, ...).
    pub fn from_rating(rating: &str) -> Option<Self> {
        let rating = rating.trim();
        if rating.starts_with('✅') {
            return Some(SafetyLevel::Safe);
        }
        if rating.starts_with('⚠') {
            return Some(SafetyLevel::Caution);
        }
        if rating.starts_with('❌') {
            return Some(SafetyLevel::Danger);
        }

        let word = rating
            .split(|c: char| !c.is_alphabetic())
            .find(|w| !w.is_empty())?
            .to_lowercase();
        match word.as_str() {
            "safe" | "good" => Some(SafetyLevel::Safe),
            "caution" | "moderate" | "warning" => Some(SafetyLevel::Caution),
            "danger" | "dangerous" | "unsafe" | "poor" => Some(SafetyLevel::Danger),
            _ => None,
        }
    }

    /// Whether pronunciation should flag the ingredient.
    pub const fn is_concerning(self) -> bool {
        !matches!(self, SafetyLevel::Safe)
    }
}
