use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Immutable record of one successful prompt execution. Created exactly
/// once, in the same transaction as the ledger debit; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Generation {
    pub id: Uuid,
    pub org_id: Uuid,
    pub prompt_id: Option<Uuid>,
    pub prompt_version_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    /// Variables supplied by the caller, as provided
    pub input_variables: Option<serde_json::Value>,
    pub output_text: String,
    pub model: String,
    pub tokens_prompt: i32,
    pub tokens_completion: i32,
    /// Cost in the smallest credit unit (micro-credits)
    pub cost: i64,
    pub latency_ms: i32,
    pub created_at: DateTime<Utc>,
}
