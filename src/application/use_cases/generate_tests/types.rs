use super::grouping::SuiteGrouping;
use crate::domain::test_case::TestCase;
use crate::infrastructure::llm_clients::LlmCompletion;
use serde::Serialize;
use serde_json::Value;

pub(crate) const SCHEMA_WARNING: &str =
    "LLM response schema did not fully validate, returning grouped output where possible";

/// Usage metadata reported by the completion provider, independent of the model's own claims.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageReport {
    pub model: Option<String>,
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
}

impl From<&LlmCompletion> for UsageReport {
    fn from(completion: &LlmCompletion) -> Self {
        Self {
            model: completion.model.clone(),
            prompt_tokens: completion.prompt_tokens,
            completion_tokens: completion.completion_tokens,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredOutput {
    pub cases: Vec<TestCase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub tests_by_suite: SuiteGrouping<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestEffortOutput {
    pub warning: String,
    pub raw: String,
    pub tests_by_suite: SuiteGrouping<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    /// Why validation failed; logged, never sent to callers.
    #[serde(skip)]
    pub schema_error: String,
}

/// What became of the model's reply.
#[derive(Debug, Clone)]
pub enum NormalizedResult {
    StructuredSuccess(StructuredOutput),
    SchemaMismatch(BestEffortOutput),
    ParseFailure { raw: String, reason: String },
}

impl NormalizedResult {
    pub fn kind(&self) -> &'static str {
        match self {
            NormalizedResult::StructuredSuccess(_) => "structured",
            NormalizedResult::SchemaMismatch(_) => "schema_mismatch",
            NormalizedResult::ParseFailure { .. } => "parse_failure",
        }
    }
}
