//! Prompt execution orchestration.
//!
//! The pipeline for one execution: balance gate, prompt and latest-version
//! lookup, BYOK key retrieval and decryption, variable resolution, provider
//! dispatch, then a single transaction recording the generation and the
//! ledger debit. Role checks happen in the handler before this service runs.
//!
//! The balance gate is a soft limit: two concurrent executions can both pass
//! it and drive the balance negative. The ledger stays consistent either way
//! and the next execution is rejected.

use std::collections::HashMap;
use std::sync::Arc;

use promptforge_core::models::Generation;
use promptforge_core::{resolve_variables, AppError, CredentialVault};
use promptforge_db::{
    ExecutionRecord, ExecutionRecorder, LedgerRepository, PromptRepository, ProviderKeyRepository,
};
use promptforge_providers::{GenerationParams, ProviderRegistry};
use uuid::Uuid;

/// Caller-supplied inputs for one execution.
#[derive(Debug, Default)]
pub struct ExecutionRequest {
    pub variables: HashMap<String, String>,
    pub model_override: Option<String>,
}

#[derive(Clone)]
pub struct ExecutionService {
    prompts: PromptRepository,
    provider_keys: ProviderKeyRepository,
    ledger: LedgerRepository,
    recorder: ExecutionRecorder,
    vault: Arc<CredentialVault>,
    providers: Arc<ProviderRegistry>,
}

impl ExecutionService {
    pub fn new(
        prompts: PromptRepository,
        provider_keys: ProviderKeyRepository,
        ledger: LedgerRepository,
        recorder: ExecutionRecorder,
        vault: Arc<CredentialVault>,
        providers: Arc<ProviderRegistry>,
    ) -> Self {
        Self {
            prompts,
            provider_keys,
            ledger,
            recorder,
            vault,
            providers,
        }
    }

    /// Execute the latest version of a prompt and record the outcome.
    ///
    /// Nothing is written unless the provider call succeeds; a failure at
    /// any step leaves the ledger and generation history untouched.
    #[tracing::instrument(
        skip(self, request),
        fields(org_id = %org_id, prompt_id = %prompt_id, user_id = %user_id)
    )]
    pub async fn execute(
        &self,
        org_id: Uuid,
        prompt_id: Uuid,
        user_id: Uuid,
        request: ExecutionRequest,
    ) -> Result<Generation, AppError> {
        let balance = self.ledger.balance(org_id).await?;
        if balance <= 0 {
            return Err(AppError::PaymentRequired { balance });
        }

        let prompt = self
            .prompts
            .get_prompt(org_id, prompt_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))?;

        let version = self
            .prompts
            .latest_version(prompt_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Prompt has no versions".to_string()))?;

        let provider_key = self
            .provider_keys
            .find_active(org_id, &version.provider)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "No active API key found for provider '{}'",
                    version.provider
                ))
            })?;

        let api_key = self.vault.decrypt(&provider_key.encrypted_key)?;

        let resolved = resolve_variables(&version.content, &request.variables);
        let provider = self.providers.get(&version.provider)?;
        let model = request.model_override.as_deref().unwrap_or(&version.model);
        let params = GenerationParams::from_stored(version.parameters.as_ref());

        let output = provider.generate(&resolved, model, &api_key, &params).await?;

        let input_variables = if request.variables.is_empty() {
            None
        } else {
            Some(serde_json::to_value(&request.variables)?)
        };

        let generation = self
            .recorder
            .record(ExecutionRecord {
                org_id,
                prompt_id,
                prompt_version_id: version.id,
                user_id,
                provider_key_id: provider_key.id,
                input_variables,
                output_text: output.text,
                model: output.model,
                tokens_prompt: output.tokens_prompt,
                tokens_completion: output.tokens_completion,
                cost: output.cost,
                latency_ms: output.latency_ms,
                ledger_description: format!(
                    "Execution of prompt: {} (v{})",
                    prompt.name, version.version
                ),
            })
            .await?;

        tracing::info!(
            generation_id = %generation.id,
            cost = generation.cost,
            "Execution recorded"
        );

        Ok(generation)
    }
}
