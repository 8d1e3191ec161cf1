use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One append-only credit ledger row. Positive amounts are credits,
/// negative amounts are debits. Rows are never updated or deleted;
/// corrections are new offsetting entries. The sum of amounts per
/// organization is the sole source of truth for spendable credit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CreditLedgerEntry {
    pub id: Uuid,
    pub org_id: Uuid,
    pub amount: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
