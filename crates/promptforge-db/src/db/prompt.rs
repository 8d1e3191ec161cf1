use promptforge_core::{
    models::{Prompt, PromptVersion},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for prompts and their immutable versions
#[derive(Clone)]
pub struct PromptRepository {
    pool: PgPool,
}

impl PromptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new prompt in an organization.
    #[tracing::instrument(skip(self, description), fields(db.table = "prompts", db.operation = "insert"))]
    pub async fn create_prompt(
        &self,
        org_id: Uuid,
        name: &str,
        slug: &str,
        description: Option<&str>,
    ) -> Result<Prompt, AppError> {
        let prompt = sqlx::query_as::<Postgres, Prompt>(
            r#"
            INSERT INTO prompts (org_id, name, slug, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, org_id, name, slug, description, created_at
            "#,
        )
        .bind(org_id)
        .bind(name)
        .bind(slug)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(prompt)
    }

    /// Get a prompt by ID, scoped to the organization.
    #[tracing::instrument(skip(self), fields(db.table = "prompts", db.operation = "select", db.record_id = %id))]
    pub async fn get_prompt(&self, org_id: Uuid, id: Uuid) -> Result<Option<Prompt>, AppError> {
        let prompt = sqlx::query_as::<Postgres, Prompt>(
            "SELECT id, org_id, name, slug, description, created_at FROM prompts WHERE org_id = $1 AND id = $2",
        )
        .bind(org_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prompt)
    }

    /// List all prompts of an organization.
    #[tracing::instrument(skip(self), fields(db.table = "prompts", db.operation = "select"))]
    pub async fn list_prompts(&self, org_id: Uuid) -> Result<Vec<Prompt>, AppError> {
        let prompts = sqlx::query_as::<Postgres, Prompt>(
            "SELECT id, org_id, name, slug, description, created_at FROM prompts WHERE org_id = $1 ORDER BY created_at DESC",
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(prompts)
    }

    /// Create the next version of a prompt.
    ///
    /// The prompt row is locked (`SELECT ... FOR UPDATE`) for the duration of
    /// the read-increment-write, so two concurrent writers can never be
    /// assigned the same number. The lock covers only local statements,
    /// never a network call. The unique (prompt_id, version) constraint
    /// backstops the lock.
    #[tracing::instrument(skip(self, content, parameters), fields(db.table = "prompt_versions", db.operation = "insert"))]
    pub async fn create_version(
        &self,
        org_id: Uuid,
        prompt_id: Uuid,
        content: &str,
        model: &str,
        provider: &str,
        parameters: Option<serde_json::Value>,
    ) -> Result<PromptVersion, AppError> {
        let mut tx = self.pool.begin().await?;

        // Serialization point for version numbering
        let prompt_exists = sqlx::query_scalar::<Postgres, Uuid>(
            "SELECT id FROM prompts WHERE id = $1 AND org_id = $2 FOR UPDATE",
        )
        .bind(prompt_id)
        .bind(org_id)
        .fetch_optional(&mut *tx)
        .await?;

        if prompt_exists.is_none() {
            return Err(AppError::NotFound("Prompt not found".to_string()));
        }

        let next_version = sqlx::query_scalar::<Postgres, i32>(
            "SELECT COALESCE(MAX(version), 0) + 1 FROM prompt_versions WHERE prompt_id = $1",
        )
        .bind(prompt_id)
        .fetch_one(&mut *tx)
        .await?;

        let version = sqlx::query_as::<Postgres, PromptVersion>(
            r#"
            INSERT INTO prompt_versions (prompt_id, version, content, model, provider, parameters)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, prompt_id, version, content, model, provider, parameters, created_at
            "#,
        )
        .bind(prompt_id)
        .bind(next_version)
        .bind(content)
        .bind(model)
        .bind(provider)
        .bind(parameters)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(version)
    }

    /// Latest version of a prompt = the one with the maximum version number.
    #[tracing::instrument(skip(self), fields(db.table = "prompt_versions", db.operation = "select"))]
    pub async fn latest_version(&self, prompt_id: Uuid) -> Result<Option<PromptVersion>, AppError> {
        let version = sqlx::query_as::<Postgres, PromptVersion>(
            r#"
            SELECT id, prompt_id, version, content, model, provider, parameters, created_at
            FROM prompt_versions
            WHERE prompt_id = $1
            ORDER BY version DESC
            LIMIT 1
            "#,
        )
        .bind(prompt_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(version)
    }

    /// All versions of a prompt, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "prompt_versions", db.operation = "select"))]
    pub async fn list_versions(&self, prompt_id: Uuid) -> Result<Vec<PromptVersion>, AppError> {
        let versions = sqlx::query_as::<Postgres, PromptVersion>(
            r#"
            SELECT id, prompt_id, version, content, model, provider, parameters, created_at
            FROM prompt_versions
            WHERE prompt_id = $1
            ORDER BY version DESC
            "#,
        )
        .bind(prompt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(versions)
    }
}
