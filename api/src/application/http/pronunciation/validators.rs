use platewise_core::domain::food_analysis::entities::SafetyLevel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::food_analysis::validators::validate_ingredient_name;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct PronounceIngredientRequest {
    #[validate(custom(function = "validate_ingredient_name"))]
    pub ingredient_name: String,
    /// Safety rating as shown to the user, e.g. `"⚠️ Caution"`.
    pub health_rating: Option<String>,
    /// Takes precedence over `health_rating` when present.
    pub is_concerned: Option<bool>,
}

impl PronounceIngredientRequest {
    pub fn is_concerned(&self) -> bool {
        self.is_concerned.unwrap_or_else(|| {
            self.health_rating
                .as_deref()
                .and_then(SafetyLevel::from_rating)
                .is_some_and(SafetyLevel::is_concerning)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(health_rating: Option<&str>, is_concerned: Option<bool>) -> PronounceIngredientRequest {
        PronounceIngredientRequest {
            ingredient_name: "Carrageenan".to_string(),
            health_rating: health_rating.map(str::to_string),
            is_concerned,
        }
    }

    #[test]
    fn test_concern_follows_rating() {
        assert!(request(Some("⚠️ Caution"), None).is_concerned());
        assert!(request(Some("❌ Danger: avoid"), None).is_concerned());
        assert!(!request(Some("✅ Safe"), None).is_concerned());
        assert!(!request(Some("no idea"), None).is_concerned());
        assert!(!request(None, None).is_concerned());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut blank = request(None, None);
        blank.ingredient_name = "   ".to_string();

        assert!(blank.validate().is_err());
        assert!(request(None, None).validate().is_ok());
    }

    #[test]
    fn test_explicit_flag_wins() {
        assert!(!request(Some("❌ Danger"), Some(false)).is_concerned());
        assert!(request(Some("✅ Safe"), Some(true)).is_concerned());
    }
}
