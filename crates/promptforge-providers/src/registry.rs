//! Injectable provider registry
//!
//! The name→adapter mapping is explicit configuration, not a hardcoded
//! lookup: tests register mock adapters, deployments can add vendors
//! without touching dispatch code.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use promptforge_core::AppError;

use crate::anthropic::AnthropicProvider;
use crate::openai::OpenAiProvider;
use crate::provider::LlmProvider;

#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn LlmProvider>>,
}

impl ProviderRegistry {
    /// Empty registry; adapters are added with `register`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in vendors (openai, anthropic), each using
    /// the given per-call timeout.
    pub fn with_defaults(timeout: Duration) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(OpenAiProvider::new(timeout)));
        registry.register(Arc::new(AnthropicProvider::new(timeout)));
        registry
    }

    pub fn register(&mut self, provider: Arc<dyn LlmProvider>) {
        self.providers
            .insert(provider.name().to_string(), provider);
    }

    /// Look up an adapter by stored provider name (case-insensitive).
    /// An unknown name is a configuration error, distinct from the network
    /// errors an adapter itself can produce.
    pub fn get(&self, name: &str) -> Result<Arc<dyn LlmProvider>, AppError> {
        self.providers
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| AppError::UnsupportedProvider(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }
}
