mod generate;
mod grouping;
mod normalizer;
mod prompts;
mod types;

use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;

pub use grouping::SuiteGrouping;
pub use types::{BestEffortOutput, NormalizedResult, StructuredOutput, UsageReport};

/// Story in, grouped test cases out. Holds no per-request state.
pub struct GenerateTestsUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    config: LLMConfig,
}

impl GenerateTestsUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>, config: LLMConfig) -> Self {
        Self { llm_client, config }
    }
}
