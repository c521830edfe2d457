use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// A user story submitted for test generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub story_title: String,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub acceptance_criteria: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default, deserialize_with = "lenient_categories")]
    pub categories: Vec<String>,
}

impl GenerateRequest {
    /// Requested suite categories, sanitized, without blanks or repeats, in input order.
    ///
    /// The prompt and the suite grouping both use this list, so the names the model is told to
    /// use are exactly the keys it is grouped under.
    pub fn requested_categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for category in &self.categories {
            let cleaned = sanitize_text(category);
            if cleaned.is_empty() || seen.contains(&cleaned) {
                continue;
            }
            seen.push(cleaned);
        }
        seen
    }
}

/// Normalizes line endings, turns tabs into spaces, drops every other control character
/// except `\n` and trims.
pub fn sanitize_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[allow(clippy::ptr_arg)]
fn validate_not_blank(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed("is required"));
        return Err(error);
    }
    Ok(())
}

// Anything other than an array counts as "no categories"; non-string entries are dropped.
fn lenient_categories<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
