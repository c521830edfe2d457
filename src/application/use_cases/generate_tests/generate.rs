use super::normalizer::normalize;
use super::prompts::{build_prompt, SYSTEM_PROMPT};
use super::types::{NormalizedResult, UsageReport};
use super::GenerateTestsUseCase;
use crate::domain::error::Result;
use crate::domain::story::GenerateRequest;
use crate::infrastructure::response::preview;
use tracing::{info, warn};
use validator::Validate;

const RAW_PREVIEW_CHARS: usize = 300;

impl GenerateTestsUseCase {
    /// Validates the story, asks the model once and normalizes whatever comes back.
    ///
    /// Only invalid input and a failed provider call are errors; every reply the provider
    /// returns ends up in one of the `NormalizedResult` variants.
    pub async fn execute(&self, request: &GenerateRequest) -> Result<NormalizedResult> {
        request.validate()?;

        let categories = request.requested_categories();
        let user_prompt = build_prompt(request, &categories);

        info!(
            model = %self.config.model,
            provider = ?self.config.provider,
            categories = categories.len(),
            "Requesting test cases"
        );

        let completion = self
            .llm_client
            .generate(&self.config, SYSTEM_PROMPT, &user_prompt)
            .await?;
        let usage = UsageReport::from(&completion);
        let result = normalize(&completion.content, &categories, &usage);

        match &result {
            NormalizedResult::StructuredSuccess(output) => info!(
                cases = output.cases.len(),
                suites = output.tests_by_suite.len(),
                prompt_tokens = output.prompt_tokens,
                completion_tokens = output.completion_tokens,
                "Generated test cases"
            ),
            NormalizedResult::SchemaMismatch(output) => warn!(
                error = %output.schema_error,
                suites = output.tests_by_suite.len(),
                raw_preview = %preview(&output.raw, RAW_PREVIEW_CHARS),
                "LLM output failed schema validation"
            ),
            NormalizedResult::ParseFailure { raw, reason } => warn!(
                error = %reason,
                raw_preview = %preview(raw, RAW_PREVIEW_CHARS),
                "LLM output is not valid JSON"
            ),
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::domain::llm_config::LLMConfig;
    use crate::infrastructure::llm_clients::{LLMClient, LlmCompletion};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct RecordingClient {
        reply: std::result::Result<LlmCompletion, String>,
        prompts: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl LLMClient for RecordingClient {
        async fn generate(
            &self,
            _config: &LLMConfig,
            system: &str,
            user: &str,
        ) -> Result<LlmCompletion> {
            self.prompts
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            self.reply.clone().map_err(AppError::LLMError)
        }
    }

    fn setup(
        reply: std::result::Result<LlmCompletion, String>,
    ) -> (GenerateTestsUseCase, Arc<RecordingClient>) {
        let client = Arc::new(RecordingClient {
            reply,
            prompts: Mutex::new(Vec::new()),
        });
        (
            GenerateTestsUseCase::new(client.clone(), LLMConfig::default()),
            client,
        )
    }

    fn login() -> GenerateRequest {
        GenerateRequest {
            story_title: "Login".to_string(),
            acceptance_criteria: "User can log in with valid credentials".to_string(),
            categories: vec!["Security".to_string(), "Unit".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_llm() {
        let (use_case, client) = setup(Ok(LlmCompletion::default()));
        let request = GenerateRequest {
            story_title: " ".to_string(),
            ..login()
        };
        let result = use_case.execute(&request).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(client.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prompts_forwarded_to_client() {
        let (use_case, client) = setup(Ok(LlmCompletion {
            content: r#"{"cases":[]}"#.to_string(),
            ..Default::default()
        }));
        use_case.execute(&login()).await.unwrap();

        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].0, SYSTEM_PROMPT);
        assert!(prompts[0].1.contains("categories: Security, Unit."));
    }

    #[tokio::test]
    async fn test_usage_from_provider_fills_gaps() {
        let (use_case, _client) = setup(Ok(LlmCompletion {
            content: r#"{"cases":[{"id":"TC-001","title":"X","steps":["a"],"expectedResult":"y","suiteCategory":"Security"}]}"#.to_string(),
            model: Some("llama-3.3-70b-versatile".to_string()),
            prompt_tokens: Some(512),
            completion_tokens: Some(128),
        }));
        match use_case.execute(&login()).await.unwrap() {
            NormalizedResult::StructuredSuccess(output) => {
                assert_eq!(output.prompt_tokens, 512);
                assert_eq!(output.completion_tokens, 128);
                assert_eq!(output.model.as_deref(), Some("llama-3.3-70b-versatile"));
                assert_eq!(output.tests_by_suite["Security"].len(), 1);
                assert!(output.tests_by_suite["Unit"].is_empty());
            }
            other => panic!("expected success, got {}", other.kind()),
        }
    }

    #[tokio::test]
    async fn test_prompt_and_grouping_share_sanitized_categories() {
        let (use_case, client) = setup(Ok(LlmCompletion {
            content: r#"{"cases":[{"id":"TC-001","title":"X","steps":["a"],"expectedResult":"y","suiteCategory":"Unit Tests"}]}"#.to_string(),
            ..Default::default()
        }));
        let request = GenerateRequest {
            categories: vec!["Unit\tTests".to_string()],
            ..login()
        };
        match use_case.execute(&request).await.unwrap() {
            NormalizedResult::StructuredSuccess(output) => {
                let keys: Vec<&str> = output.tests_by_suite.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["Unit Tests"]);
                assert_eq!(output.tests_by_suite["Unit Tests"].len(), 1);
            }
            other => panic!("expected success, got {}", other.kind()),
        }
        let prompts = client.prompts.lock().unwrap();
        assert!(prompts[0].1.contains("categories: Unit Tests."));
    }

    #[tokio::test]
    async fn test_provider_failure_is_terminal() {
        let (use_case, client) = setup(Err("connection refused".to_string()));
        let result = use_case.execute(&login()).await;
        assert!(matches!(result, Err(AppError::LLMError(_))));
        assert_eq!(client.prompts.lock().unwrap().len(), 1);
    }
}
