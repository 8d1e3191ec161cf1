use serde::{Deserialize, Serialize};

/// Normalized result of one provider call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderOutput {
    pub text: String,
    pub model: String,
    pub tokens_prompt: i32,
    pub tokens_completion: i32,
    /// Cost in micro-credits (smallest ledger unit)
    pub cost: i64,
    pub latency_ms: i32,
}

/// Generation parameters stored opaquely on a prompt version.
/// Unknown fields are ignored so vendors can carry extra settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl GenerationParams {
    /// Parse stored version parameters, falling back to defaults when absent.
    /// Malformed parameter JSON falls back to defaults rather than failing
    /// the execution.
    pub fn from_stored(parameters: Option<&serde_json::Value>) -> Self {
        parameters
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}

/// Linear per-token pricing in micro-credits.
#[derive(Debug, Clone, Copy)]
pub struct Pricing {
    pub prompt_per_token: f64,
    pub completion_per_token: f64,
}

impl Pricing {
    /// cost = prompt_tokens * p + completion_tokens * c, truncated to i64.
    pub fn cost(&self, prompt_tokens: i32, completion_tokens: i32) -> i64 {
        (prompt_tokens as f64 * self.prompt_per_token
            + completion_tokens as f64 * self.completion_per_token) as i64
    }
}
