use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::application::GenerateTestsUseCase;
use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::llm_clients::{LLMClient, RouterClient};
use crate::interfaces::http::{start_server, HttpState};

pub async fn run() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = ConfigService::load()?;
    if config.llm.api_key.is_none() {
        warn!(
            base_url = %config.llm.base_url(),
            "No LLM API key configured; hosted providers will reject requests"
        );
    }

    let llm_client: Arc<dyn LLMClient + Send + Sync> = Arc::new(RouterClient::new());
    let generate_use_case = Arc::new(GenerateTestsUseCase::new(llm_client, config.llm.clone()));

    info!(
        host = %config.server.host,
        port = config.server.port,
        provider = ?config.llm.provider,
        model = %config.llm.model,
        "Starting HTTP server"
    );

    start_server(&config.server, HttpState { generate_use_case })?.await?;
    Ok(())
}
