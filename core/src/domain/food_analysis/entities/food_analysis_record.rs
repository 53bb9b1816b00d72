use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::upc_code::{UpcCode, deserialize_optional_upc};

/// Placeholder for anything the model could not determine.
pub const UNKNOWN: &str = "unknown";

pub(crate) fn unknown() -> String {
    UNKNOWN.to_string()
}

/// Structured result of a food photo analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodAnalysisRecord {
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub food_name: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub estimated_size: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_upc",
        skip_serializing_if = "Option::is_none"
    )]
    pub upc_code: Option<UpcCode>,
    #[serde(
        default,
        deserialize_with = "deserialize_confidence",
        skip_serializing_if = "Option::is_none"
    )]
    pub upc_confidence: Option<f64>,
    #[serde(default)]
    pub nutrition_data: NutritionData,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Nutrient values as value-with-unit strings, e.g. `"12 g"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NutritionData {
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub calories: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub protein: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub carbohydrates: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub fat: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub fiber: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub sugar: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub sodium: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub vitamin_c: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub calcium: String,
    #[serde(default = "unknown", deserialize_with = "deserialize_text")]
    pub iron: String,
}

impl Default for NutritionData {
    fn default() -> Self {
        Self {
            calories: unknown(),
            protein: unknown(),
            carbohydrates: unknown(),
            fat: unknown(),
            fiber: unknown(),
            sugar: unknown(),
            sodium: unknown(),
            vitamin_c: unknown(),
            calcium: unknown(),
            iron: unknown(),
        }
    }
}

/// Scalars are expected as strings, but bare numbers are common
/// (`"calories": 95`). Both are kept as text, null becomes "unknown".
pub(crate) fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(unknown()),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, got {other}"
        ))),
    }
}

/// Confidence must land in [0.0, 1.0]; "unknown" or out-of-range values are
/// treated as absent.
fn deserialize_confidence<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let confidence = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(confidence.filter(|c| (0.0..=1.0).contains(c)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let record: FoodAnalysisRecord = serde_json::from_str(r#"{"food_name":"Apple"}"#).unwrap();

        assert_eq!(record.food_name, "Apple");
        assert_eq!(record.estimated_size, UNKNOWN);
        assert_eq!(record.upc_code, None);
        assert_eq!(record.upc_confidence, None);
        assert_eq!(record.nutrition_data, NutritionData::default());
        assert!(record.ingredients.is_empty());
    }

    #[test]
    fn test_numeric_nutrients_are_kept_as_text() {
        let record: FoodAnalysisRecord = serde_json::from_str(
            r#"{"food_name":"Toast","nutrition_data":{"calories":95,"protein":"3 g","iron":null}}"#,
        )
        .unwrap();

        assert_eq!(record.nutrition_data.calories, "95");
        assert_eq!(record.nutrition_data.protein, "3 g");
        assert_eq!(record.nutrition_data.iron, UNKNOWN);
        assert_eq!(record.nutrition_data.fat, UNKNOWN);
    }

    #[test]
    fn test_invalid_upc_and_confidence_are_dropped() {
        let record: FoodAnalysisRecord = serde_json::from_str(
            r#"{"food_name":"Chips","upc_code":"unknown","upc_confidence":"unknown"}"#,
        )
        .unwrap();
        assert_eq!(record.upc_code, None);
        assert_eq!(record.upc_confidence, None);

        let record: FoodAnalysisRecord =
            serde_json::from_str(r#"{"upc_code":"012345678905","upc_confidence":1.5}"#).unwrap();
        assert_eq!(record.upc_code, UpcCode::parse("012345678905"));
        assert_eq!(record.upc_confidence, None);
    }

    #[test]
    fn test_absent_upc_is_not_serialized() {
        let record: FoodAnalysisRecord = serde_json::from_str(r#"{"food_name":"Pear"}"#).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("upc_code").is_none());
        assert!(json.get("upc_confidence").is_none());
        assert_eq!(json["nutrition_data"]["vitamin_c"], UNKNOWN);
    }
}
