use promptforge_core::{models::Generation, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for immutable generation records
#[derive(Clone)]
pub struct GenerationRepository {
    pool: PgPool,
}

impl GenerationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get one generation by ID, scoped to the organization.
    #[tracing::instrument(skip(self), fields(db.table = "generations", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, org_id: Uuid, id: Uuid) -> Result<Option<Generation>, AppError> {
        let generation = sqlx::query_as::<Postgres, Generation>(
            r#"
            SELECT id, org_id, prompt_id, prompt_version_id, user_id, input_variables,
                   output_text, model, tokens_prompt, tokens_completion, cost, latency_ms,
                   created_at
            FROM generations
            WHERE org_id = $1 AND id = $2
            "#,
        )
        .bind(org_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(generation)
    }

    /// Execution history for an organization, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "generations", db.operation = "select"))]
    pub async fn list(
        &self,
        org_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Generation>, AppError> {
        let generations = sqlx::query_as::<Postgres, Generation>(
            r#"
            SELECT id, org_id, prompt_id, prompt_version_id, user_id, input_variables,
                   output_text, model, tokens_prompt, tokens_completion, cost, latency_ms,
                   created_at
            FROM generations
            WHERE org_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(org_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(generations)
    }
}
