use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// BYOK provider credential. `encrypted_key` is vault ciphertext; the
/// plaintext is never persisted. `key_prefix` is a non-secret fragment of
/// the plaintext stored for UI identification only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProviderKey {
    pub id: Uuid,
    pub org_id: Uuid,
    pub provider: String,
    pub key_name: String,
    #[serde(skip_serializing)]
    pub encrypted_key: String,
    pub key_prefix: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}
