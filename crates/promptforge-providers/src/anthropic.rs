//! Anthropic messages adapter

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::ProviderError;
use crate::provider::LlmProvider;
use crate::types::{GenerationParams, Pricing, ProviderOutput};

const PROVIDER: &str = "anthropic";
const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Flat per-token pricing in micro-credits for all model families.
const PRICING: Pricing = Pricing {
    prompt_per_token: 8.0,
    completion_per_token: 24.0,
};

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: i32,
    #[serde(default)]
    output_tokens: i32,
}

pub struct AnthropicProvider {
    client: reqwest::Client,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(timeout, API_URL.to_string())
    }

    /// Override the endpoint, mainly for tests.
    pub fn with_base_url(timeout: Duration, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client, base_url }
    }
}

fn parse_response(
    body: MessagesResponse,
    model: &str,
    latency_ms: i32,
) -> Result<ProviderOutput, ProviderError> {
    let text = body
        .content
        .into_iter()
        .next()
        .map(|block| block.text)
        .ok_or_else(|| ProviderError::UnexpectedResponse {
            provider: PROVIDER,
            detail: "response contained no content blocks".to_string(),
        })?;

    let cost = PRICING.cost(body.usage.input_tokens, body.usage.output_tokens);

    Ok(ProviderOutput {
        text,
        model: model.to_string(),
        tokens_prompt: body.usage.input_tokens,
        tokens_completion: body.usage.output_tokens,
        cost,
        latency_ms,
    })
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
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
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
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

        let body: MessagesResponse =
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

    #[test]
    fn test_parse_response_normalizes_usage() {
        let body: MessagesResponse = serde_json::from_value(serde_json::json!({
            "id": "msg_01",
            "content": [{"type": "text", "text": "Greetings."}],
            "usage": {"input_tokens": 12, "output_tokens": 4}
        }))
        .unwrap();

        let output = parse_response(body, "claude-3-haiku", 7).unwrap();
        assert_eq!(output.text, "Greetings.");
        assert_eq!(output.tokens_prompt, 12);
        assert_eq!(output.tokens_completion, 4);
        // 12 * 8 + 4 * 24 = 192
        assert_eq!(output.cost, 192);
        assert_eq!(output.latency_ms, 7);
    }

    #[test]
    fn test_empty_content_is_unexpected_response() {
        let body: MessagesResponse =
            serde_json::from_value(serde_json::json!({"content": []})).unwrap();
        assert!(matches!(
            parse_response(body, "claude-3-haiku", 0),
            Err(ProviderError::UnexpectedResponse { .. })
        ));
    }
}
