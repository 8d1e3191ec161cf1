//! PromptForge provider adapter layer
//!
//! A uniform `LlmProvider` capability over heterogeneous external LLM HTTP
//! APIs (BYOK: the caller supplies the plaintext API key per call). Each
//! adapter builds its vendor's request shape, applies a bounded timeout with
//! no automatic retry, normalizes usage fields, and prices the call in
//! micro-credits. Adapters are looked up through an injectable registry.

pub mod anthropic;
pub mod error;
pub mod openai;
pub mod provider;
pub mod registry;
pub mod types;

pub use anthropic::AnthropicProvider;
pub use error::ProviderError;
pub use openai::OpenAiProvider;
pub use provider::LlmProvider;
pub use registry::ProviderRegistry;
pub use types::{GenerationParams, ProviderOutput};
