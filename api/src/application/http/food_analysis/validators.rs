use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeIngredientRequest {
    /// Passed to the model verbatim, apart from surrounding whitespace.
    #[validate(custom(function = "validate_ingredient_name"))]
    pub ingredient_name: String,
}

/// Names have no length limit, but must contain something besides whitespace.
pub fn validate_ingredient_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("ingredient_name must not be blank")));
    }
    Ok(())
}

/// Multipart body of `POST /upload`, for the OpenAPI document only.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub consumed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> AnalyzeIngredientRequest {
        AnalyzeIngredientRequest {
            ingredient_name: name.to_string(),
        }
    }

    #[test]
    fn test_blank_names_are_rejected() {
        for name in ["", " ", "\t\n "] {
            assert!(request(name).validate().is_err(), "{name:?}");
        }
    }

    #[test]
    fn test_long_names_are_accepted() {
        let name = "Polyoxyethylene sorbitan monooleate ".repeat(10);
        assert!(name.chars().count() > 200);
        assert!(request(&name).validate().is_ok());
    }
}
