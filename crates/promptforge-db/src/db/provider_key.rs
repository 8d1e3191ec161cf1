use promptforge_core::{models::ProviderKey, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for BYOK provider credentials
#[derive(Clone)]
pub struct ProviderKeyRepository {
    pool: PgPool,
}

impl ProviderKeyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store an encrypted provider key. The caller encrypts via the vault;
    /// this layer never sees plaintext.
    #[tracing::instrument(skip(self, encrypted_key), fields(db.table = "provider_keys", db.operation = "insert"))]
    pub async fn create(
        &self,
        org_id: Uuid,
        provider: &str,
        key_name: &str,
        encrypted_key: &str,
        key_prefix: &str,
    ) -> Result<ProviderKey, AppError> {
        let key = sqlx::query_as::<Postgres, ProviderKey>(
            r#"
            INSERT INTO provider_keys (org_id, provider, key_name, encrypted_key, key_prefix)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, org_id, provider, key_name, encrypted_key, key_prefix,
                      is_active, created_at, last_used_at
            "#,
        )
        .bind(org_id)
        .bind(provider)
        .bind(key_name)
        .bind(encrypted_key)
        .bind(key_prefix)
        .fetch_one(&self.pool)
        .await?;

        Ok(key)
    }

    /// Find an active key for (org, provider). When several are active the
    /// most recently added wins.
    #[tracing::instrument(skip(self), fields(db.table = "provider_keys", db.operation = "select"))]
    pub async fn find_active(
        &self,
        org_id: Uuid,
        provider: &str,
    ) -> Result<Option<ProviderKey>, AppError> {
        let key = sqlx::query_as::<Postgres, ProviderKey>(
            r#"
            SELECT id, org_id, provider, key_name, encrypted_key, key_prefix,
                   is_active, created_at, last_used_at
            FROM provider_keys
            WHERE org_id = $1 AND provider = $2 AND is_active = TRUE
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(org_id)
        .bind(provider)
        .fetch_optional(&self.pool)
        .await?;

        Ok(key)
    }

    /// List all keys of an organization (ciphertext included; handlers mask).
    #[tracing::instrument(skip(self), fields(db.table = "provider_keys", db.operation = "select"))]
    pub async fn list(&self, org_id: Uuid) -> Result<Vec<ProviderKey>, AppError> {
        let keys = sqlx::query_as::<Postgres, ProviderKey>(
            r#"
            SELECT id, org_id, provider, key_name, encrypted_key, key_prefix,
                   is_active, created_at, last_used_at
            FROM provider_keys
            WHERE org_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }

    /// Delete a provider key. Returns false when no row matched.
    #[tracing::instrument(skip(self), fields(db.table = "provider_keys", db.operation = "delete", db.record_id = %key_id))]
    pub async fn delete(&self, org_id: Uuid, key_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM provider_keys WHERE org_id = $1 AND id = $2")
            .bind(org_id)
            .bind(key_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
