use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::domain::{
    common::entities::app_errors::CoreError, food_analysis::value_objects::ParseOutcome,
};

const FENCE: &str = "```";

/// An opening fence. A word right after it only counts as a language tag when
/// the line ends there or a JSON value starts right away, so "```Apple```"
/// keeps its content.
static LEADING_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^```(?:[A-Za-z0-9_+-]*[ \t]*(?:\r?\n|$)|[A-Za-z0-9_+-]+[ \t]*(?P<body>[{\[]))?")
        .expect("valid fence pattern")
});

/// Where the content after a leading fence starts, if there is one.
fn fence_end(text: &str) -> Option<usize> {
    let captures = LEADING_FENCE.captures(text)?;
    match captures.name("body") {
        Some(body) => Some(body.start()),
        None => captures.get(0).map(|found| found.end()),
    }
}

/// Strips Markdown code fences (an opening fence with an optional language
/// tag and a closing fence) and surrounding whitespace.
///
/// Nested fences are peeled until none are left, which keeps the function
/// idempotent.
pub fn clean(raw: &str) -> String {
    let mut text = raw.trim();

    loop {
        let before = text.len();

        if let Some(end) = fence_end(text) {
            text = text[end..].trim_start();
        }
        if let Some(stripped) = text.strip_suffix(FENCE) {
            text = stripped.trim_end();
        }
        text = text.trim();

        if text.len() == before {
            return text.to_string();
        }
    }
}

/// Decodes cleaned model text. Never fails: anything that does not decode
/// comes back as [`ParseOutcome::RawFallback`] carrying the text.
pub fn parse<T: DeserializeOwned>(cleaned: &str) -> ParseOutcome<T> {
    match decode::<T>(cleaned) {
        Ok(record) => ParseOutcome::Parsed(record),
        Err(e) => {
            tracing::warn!(error = %e, chars = cleaned.len(), "model returned malformed JSON, keeping raw response");
            ParseOutcome::RawFallback(cleaned.to_string())
        }
    }
}

/// Records are JSON objects. Arrays are refused up front because serde would
/// otherwise accept them as positional structs.
fn decode<T: DeserializeOwned>(cleaned: &str) -> Result<T, CoreError> {
    let value: serde_json::Value =
        serde_json::from_str(cleaned).map_err(|e| CoreError::MalformedOutput(e.to_string()))?;
    if !value.is_object() {
        return Err(CoreError::MalformedOutput(
            "expected a JSON object".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| CoreError::MalformedOutput(e.to_string()))
}
