//! Transactional recording of execution side effects
//!
//! A successful provider call produces three writes that must commit
//! together or not at all: the provider key's `last_used_at` touch, the
//! generation row, and the negative ledger entry. Bundling them here keeps
//! the orchestrator free of raw transaction handling.

use promptforge_core::{models::Generation, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Everything needed to persist one successful execution.
#[derive(Debug)]
pub struct ExecutionRecord {
    pub org_id: Uuid,
    pub prompt_id: Uuid,
    pub prompt_version_id: Uuid,
    pub user_id: Uuid,
    pub provider_key_id: Uuid,
    pub input_variables: Option<serde_json::Value>,
    pub output_text: String,
    pub model: String,
    pub tokens_prompt: i32,
    pub tokens_completion: i32,
    pub cost: i64,
    pub latency_ms: i32,
    /// Human-readable ledger description referencing prompt name + version
    pub ledger_description: String,
}

/// Persists execution outcomes atomically.
#[derive(Clone)]
pub struct ExecutionRecorder {
    pool: PgPool,
}

impl ExecutionRecorder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Commit the three execution writes as one unit and return the
    /// persisted generation. Any failure rolls back all of them.
    #[tracing::instrument(
        skip(self, record),
        fields(db.operation = "transaction", org_id = %record.org_id, cost = record.cost)
    )]
    pub async fn record(&self, record: ExecutionRecord) -> Result<Generation, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE provider_keys SET last_used_at = NOW() WHERE id = $1")
            .bind(record.provider_key_id)
            .execute(&mut *tx)
            .await?;

        let generation = sqlx::query_as::<Postgres, Generation>(
            r#"
            INSERT INTO generations (org_id, prompt_id, prompt_version_id, user_id,
                                     input_variables, output_text, model,
                                     tokens_prompt, tokens_completion, cost, latency_ms)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, org_id, prompt_id, prompt_version_id, user_id, input_variables,
                      output_text, model, tokens_prompt, tokens_completion, cost, latency_ms,
                      created_at
            "#,
        )
        .bind(record.org_id)
        .bind(record.prompt_id)
        .bind(record.prompt_version_id)
        .bind(record.user_id)
        .bind(&record.input_variables)
        .bind(&record.output_text)
        .bind(&record.model)
        .bind(record.tokens_prompt)
        .bind(record.tokens_completion)
        .bind(record.cost)
        .bind(record.latency_ms)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO credit_ledger (org_id, amount, description) VALUES ($1, $2, $3)")
            .bind(record.org_id)
            .bind(-record.cost)
            .bind(&record.ledger_description)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(generation)
    }
}
