use super::grouping::{group_by_suite, SuiteGrouping, FALLBACK_SUITE};
use super::types::{
    BestEffortOutput, NormalizedResult, StructuredOutput, UsageReport, SCHEMA_WARNING,
};
use crate::domain::test_case::GenerateResponse;
use crate::infrastructure::response::clean_json_output;
use serde_json::{json, Value};

/// Parses, validates and groups a raw model reply.
///
/// Never fails: a reply that is not JSON becomes `ParseFailure`, JSON that does not match the
/// case schema becomes `SchemaMismatch` with whatever grouping could be salvaged.
pub(crate) fn normalize(raw: &str, requested: &[String], usage: &UsageReport) -> NormalizedResult {
    let parsed = match parse_reply(raw) {
        Ok(value) => value,
        Err(err) => {
            return NormalizedResult::ParseFailure {
                raw: raw.to_string(),
                reason: err.to_string(),
            }
        }
    };

    let tests_by_suite = group_parsed(&parsed, raw, requested);

    match serde_json::from_value::<GenerateResponse>(candidate(&parsed, usage)) {
        Ok(validated) => NormalizedResult::StructuredSuccess(StructuredOutput {
            cases: validated.cases,
            model: usage.model.clone().or(validated.model),
            prompt_tokens: validated.prompt_tokens.unwrap_or(0),
            completion_tokens: validated.completion_tokens.unwrap_or(0),
            tests_by_suite,
        }),
        Err(err) => NormalizedResult::SchemaMismatch(BestEffortOutput {
            warning: SCHEMA_WARNING.to_string(),
            raw: raw.to_string(),
            tests_by_suite,
            model: usage
                .model
                .clone()
                .or_else(|| field(&parsed, "model").and_then(Value::as_str).map(str::to_string)),
            prompt_tokens: token_count(&parsed, "promptTokens", usage.prompt_tokens),
            completion_tokens: token_count(&parsed, "completionTokens", usage.completion_tokens),
            schema_error: err.to_string(),
        }),
    }
}

// Cleaning only applies when the reply is not JSON as-is, so tags quoted inside string values
// survive untouched.
fn parse_reply(raw: &str) -> serde_json::Result<Value> {
    serde_json::from_str(raw.trim()).or_else(|_| serde_json::from_str(&clean_json_output(raw)))
}

fn group_parsed(parsed: &Value, raw: &str, requested: &[String]) -> SuiteGrouping<Value> {
    match field(parsed, "cases") {
        Some(Value::Array(cases)) => group_by_suite(cases.iter().cloned(), requested),
        _ => {
            let sole = match parsed {
                Value::Null => Value::String(raw.to_string()),
                other => other.clone(),
            };
            let mut grouping = SuiteGrouping::new();
            grouping.insert(FALLBACK_SUITE.to_string(), vec![sole]);
            for category in requested {
                grouping.entry(category.clone()).or_default();
            }
            grouping
        }
    }
}

// The object that gets validated: absent cases count as none, token counts fall back to the
// provider's report.
fn candidate(parsed: &Value, usage: &UsageReport) -> Value {
    let present = |key: &str| field(parsed, key).filter(|value| !value.is_null()).cloned();

    json!({
        "cases": present("cases").unwrap_or_else(|| json!([])),
        "model": present("model"),
        "promptTokens": present("promptTokens").or_else(|| usage.prompt_tokens.map(Value::from)),
        "completionTokens": present("completionTokens")
            .or_else(|| usage.completion_tokens.map(Value::from)),
    })
}

fn token_count(parsed: &Value, key: &str, reported: Option<u64>) -> u64 {
    field(parsed, key)
        .and_then(Value::as_u64)
        .or(reported)
        .unwrap_or(0)
}

fn field<'a>(parsed: &'a Value, key: &str) -> Option<&'a Value> {
    parsed.as_object().and_then(|object| object.get(key))
}
