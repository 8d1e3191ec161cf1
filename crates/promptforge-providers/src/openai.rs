//! OpenAI chat-completions adapter

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::ProviderError;
use crate::provider::LlmProvider;
use crate::types::{GenerationParams, Pricing, ProviderOutput};

const PROVIDER: &str = "openai";
const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Micro-credits per token for the gpt-4 model family.
const GPT4_PRICING: Pricing = Pricing {
    prompt_per_token: 30.0,
    completion_per_token: 60.0,
};
/// Cheapest tier; also the fallback for unmatched model names.
const DEFAULT_PRICING: Pricing = Pricing {
    prompt_per_token: 1.5,
    completion_per_token: 2.0,
};

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: i32,
    #[serde(default)]
    completion_tokens: i32,
}

pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(timeout, API_URL.to_string())
    }

    /// Override the endpoint, for OpenAI-compatible gateways and tests.
    pub fn with_base_url(timeout: Duration, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client, base_url }
    }
}

pub(crate) fn pricing_for_model(model: &str) -> Pricing {
    if model.to_lowercase().contains("gpt-4") {
        GPT4_PRICING
    } else {
        DEFAULT_PRICING
    }
}

fn parse_response(
    body: ChatCompletionResponse,
    model: &str,
    latency_ms: i32,
) -> Result<ProviderOutput, ProviderError> {
    let text = body
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| ProviderError::UnexpectedResponse {
            provider: PROVIDER,
            detail: "response contained no choices".to_string(),
        })?;

    let cost = pricing_for_model(model).cost(body.usage.prompt_tokens, body.usage.completion_tokens);

    Ok(ProviderOutput {
        text,
        model: model.to_string(),
        tokens_prompt: body.usage.prompt_tokens,
        tokens_completion: body.usage.completion_tokens,
        cost,
        latency_ms,
    })
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    #[tracing::instrument(skip(self, prompt, api_key, params), fields(provider = PROVIDER, model = %model))]
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        api_key: &str,
        params: &GenerationParams,
    ) -> Result<ProviderOutput, ProviderError> {
        let start = Instant::now();

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&json!({
                "model": model,
                "messages": [{"role": "user", "content": prompt}],
                "temperature": params.temperature,
                "max_tokens": params.max_tokens,
            }))
            .send()
            .await
            .map_err(|source| ProviderError::Network {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                detail,
            });
        }

        let body: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::UnexpectedResponse {
                    provider: PROVIDER,
                    detail: e.to_string(),
                })?;

        let latency_ms = start.elapsed().as_millis() as i32;
        parse_response(body, model, latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> ChatCompletionResponse {
        serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "Hello there!"},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_response_normalizes_usage() {
        let output = parse_response(sample_response(), "gpt-3.5-turbo", 42).unwrap();
        assert_eq!(output.text, "Hello there!");
        assert_eq!(output.tokens_prompt, 10);
        assert_eq!(output.tokens_completion, 5);
        assert_eq!(output.latency_ms, 42);
        // 10 * 1.5 + 5 * 2.0 = 25
        assert_eq!(output.cost, 25);
    }

    #[test]
    fn test_gpt4_family_pricing() {
        let output = parse_response(sample_response(), "gpt-4-turbo", 0).unwrap();
        // 10 * 30 + 5 * 60 = 600
        assert_eq!(output.cost, 600);
    }

    #[test]
    fn test_unknown_model_falls_back_to_cheapest_tier() {
        let output = parse_response(sample_response(), "experimental-model", 0).unwrap();
        assert_eq!(output.cost, 25);
    }

    #[test]
    fn test_missing_usage_defaults_to_zero() {
        let body: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"content": "hi"}}]
        }))
        .unwrap();
        let output = parse_response(body, "gpt-4", 1).unwrap();
        assert_eq!(output.tokens_prompt, 0);
        assert_eq!(output.cost, 0);
    }

    #[test]
    fn test_empty_choices_is_unexpected_response() {
        let body: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({"choices": []})).unwrap();
        assert!(matches!(
            parse_response(body, "gpt-4", 0),
            Err(ProviderError::UnexpectedResponse { .. })
        ));
    }
}
