use serde::{Deserialize, Serialize};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LLMProvider {
    /// Any `/chat/completions` endpoint: Groq, OpenAI, LM Studio, Ollama.
    #[serde(alias = "openai", alias = "groq", alias = "OpenAI", alias = "Groq")]
    OpenAICompatible,
    #[serde(alias = "gemini", alias = "Google")]
    Gemini,
}

impl LLMProvider {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            LLMProvider::OpenAICompatible => GROQ_BASE_URL,
            LLMProvider::Gemini => GEMINI_BASE_URL,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    /// Falls back to the provider's hosted endpoint when unset.
    #[serde(default)]
    pub base_url: Option<String>,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    /// Ask the provider for a JSON object response when it supports it.
    #[serde(default = "default_json_mode")]
    pub json_mode: bool,
}

fn default_json_mode() -> bool {
    true
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::OpenAICompatible,
            base_url: None,
            model: GROQ_DEFAULT_MODEL.to_string(),
            api_key: None,
            max_tokens: Some(4096),
            temperature: Some(0.2),
            json_mode: true,
        }
    }
}

impl LLMConfig {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
