use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "storycase.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LLMConfig,
}

pub struct ConfigService;

impl ConfigService {
    /// Loads `.env`, then layers defaults, the TOML file and environment variables.
    pub fn load() -> Result<AppConfig> {
        let _ = dotenvy::dotenv();
        let path = std::env::var("STORYCASE_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::figment(&path).extract().map_err(Into::into)
    }

    pub fn figment(path: &str) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("STORYCASE_").split("__"))
            .merge(
                Env::raw()
                    .only(&["GROQ_API_KEY", "GROQ_MODEL", "GROQ_API_BASE"])
                    .map(|key| {
                        if key == "GROQ_API_KEY" {
                            "llm.api_key".into()
                        } else if key == "GROQ_MODEL" {
                            "llm.model".into()
                        } else {
                            "llm.base_url".into()
                        }
                    }),
            )
    }
}
