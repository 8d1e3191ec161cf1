use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{GenerationParams, ProviderOutput};

/// Capability implemented by every LLM vendor adapter.
///
/// One network attempt per call, bounded by the adapter's timeout; failures
/// surface directly and are never retried here.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Registry name of this adapter (e.g. "openai").
    fn name(&self) -> &'static str;

    /// Execute a completion with the caller-supplied plaintext API key.
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        api_key: &str,
        params: &GenerationParams,
    ) -> Result<ProviderOutput, ProviderError>;
}
