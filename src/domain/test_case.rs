use serde::{Deserialize, Serialize};

pub const UNCATEGORIZED: &str = "Uncategorized";

/// One model-authored test case. Field values are passed through as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub title: String,
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,
    pub expected_result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite_category: Option<String>,
}

/// The body the model is instructed to return.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub cases: Vec<TestCase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    #[serde(default)]
    pub completion_tokens: Option<u64>,
}

/// Something that can be bucketed by suite category.
pub trait SuiteTagged {
    /// The raw suite label, before trimming.
    fn suite_label(&self) -> Option<String>;

    /// Trimmed label, or `Uncategorized` when there is nothing usable.
    fn suite_key(&self) -> String {
        self.suite_label()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string())
    }
}

impl SuiteTagged for TestCase {
    fn suite_label(&self) -> Option<String> {
        self.suite_category.clone()
    }
}

impl SuiteTagged for serde_json::Value {
    fn suite_label(&self) -> Option<String> {
        match self.get("suiteCategory")? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}
