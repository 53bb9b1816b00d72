use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A 12-digit Universal Product Code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "012345678905")]
pub struct UpcCode(String);

impl UpcCode {
    pub const LENGTH: usize = 12;

    /// Accepts exactly twelve ASCII digits, ignoring surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.len() == Self::LENGTH && value.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Models answer "unknown", "" or a malformed code when they cannot read a
/// barcode. Anything that is not a valid UPC is treated as absent instead of
/// failing the whole record.
pub(crate) fn deserialize_optional_upc<'de, D>(deserializer: D) -> Result<Option<UpcCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => UpcCode::parse(&s),
        Some(serde_json::Value::Number(n)) => UpcCode::parse(&n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_twelve_digits() {
        let upc = UpcCode::parse(" 012345678905 ").unwrap();
        assert_eq!(upc.as_str(), "012345678905");
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for bad in ["", "unknown", "01234567890", "0123456789055", "01234567890a"] {
            assert!(UpcCode::parse(bad).is_none(), "{bad}");
        }
    }
}
