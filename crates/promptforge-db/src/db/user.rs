use promptforge_core::{models::User, AppError};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for user identity lookup.
///
/// The execution engine only consumes (id, is_active); account management
/// lives in the auth layer.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.record_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            "SELECT id, email, is_active, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a user row. Used by tests and by the (out-of-scope)
    /// registration flow.
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "insert"))]
    pub async fn create(&self, email: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            r#"
            INSERT INTO users (email)
            VALUES ($1)
            RETURNING id, email, is_active, created_at
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
