use promptforge_core::{models::CreditLedgerEntry, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for the append-only credit ledger.
///
/// Rows are only ever inserted. Balance is always computed as the sum of
/// entries; there is no cached balance column to drift out of sync.
#[derive(Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Current balance of an organization: sum of all entries, 0 if none.
    #[tracing::instrument(skip(self), fields(db.table = "credit_ledger", db.operation = "select"))]
    pub async fn balance(&self, org_id: Uuid) -> Result<i64, AppError> {
        let balance = sqlx::query_scalar::<Postgres, i64>(
            "SELECT COALESCE(SUM(amount), 0) FROM credit_ledger WHERE org_id = $1",
        )
        .bind(org_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(balance)
    }

    /// Append a positive entry. Amount must be > 0.
    #[tracing::instrument(skip(self, description), fields(db.table = "credit_ledger", db.operation = "insert"))]
    pub async fn credit(
        &self,
        org_id: Uuid,
        amount: i64,
        description: &str,
    ) -> Result<CreditLedgerEntry, AppError> {
        if amount <= 0 {
            return Err(AppError::InvalidInput(
                "Credit amount must be positive".to_string(),
            ));
        }
        self.append(org_id, amount, description).await
    }

    /// Append a negative entry. Amount is the positive cost; stored negated.
    #[tracing::instrument(skip(self, description), fields(db.table = "credit_ledger", db.operation = "insert"))]
    pub async fn debit(
        &self,
        org_id: Uuid,
        amount: i64,
        description: &str,
    ) -> Result<CreditLedgerEntry, AppError> {
        if amount <= 0 {
            return Err(AppError::InvalidInput(
                "Debit amount must be positive".to_string(),
            ));
        }
        self.append(org_id, -amount, description).await
    }

    async fn append(
        &self,
        org_id: Uuid,
        amount: i64,
        description: &str,
    ) -> Result<CreditLedgerEntry, AppError> {
        let entry = sqlx::query_as::<Postgres, CreditLedgerEntry>(
            r#"
            INSERT INTO credit_ledger (org_id, amount, description)
            VALUES ($1, $2, $3)
            RETURNING id, org_id, amount, description, created_at
            "#,
        )
        .bind(org_id)
        .bind(amount)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Ledger history for an organization, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "credit_ledger", db.operation = "select"))]
    pub async fn list_entries(
        &self,
        org_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CreditLedgerEntry>, AppError> {
        let entries = sqlx::query_as::<Postgres, CreditLedgerEntry>(
            r#"
            SELECT id, org_id, amount, description, created_at
            FROM credit_ledger
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

        Ok(entries)
    }
}
