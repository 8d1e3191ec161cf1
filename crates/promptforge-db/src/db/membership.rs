use promptforge_core::{
    models::{OrgRole, OrganizationMember},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for organization memberships
#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the caller's membership in a specific organization.
    /// (org_id, user_id) is unique, so at most one row exists.
    #[tracing::instrument(skip(self), fields(db.table = "organization_members", db.operation = "select"))]
    pub async fn find_membership(
        &self,
        org_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<OrganizationMember>, AppError> {
        let member = sqlx::query_as::<Postgres, OrganizationMember>(
            "SELECT id, org_id, user_id, role, created_at FROM organization_members WHERE org_id = $1 AND user_id = $2",
        )
        .bind(org_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Add a member to an organization. Fails on duplicate membership.
    #[tracing::instrument(skip(self), fields(db.table = "organization_members", db.operation = "insert"))]
    pub async fn add_member(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        role: OrgRole,
    ) -> Result<OrganizationMember, AppError> {
        let member = sqlx::query_as::<Postgres, OrganizationMember>(
            r#"
            INSERT INTO organization_members (org_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING id, org_id, user_id, role, created_at
            "#,
        )
        .bind(org_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::BadRequest("User is already a member of this organization".to_string())
            }
            _ => AppError::from(e),
        })?;

        Ok(member)
    }

    /// List all memberships of an organization.
    #[tracing::instrument(skip(self), fields(db.table = "organization_members", db.operation = "select"))]
    pub async fn list_members(&self, org_id: Uuid) -> Result<Vec<OrganizationMember>, AppError> {
        let members = sqlx::query_as::<Postgres, OrganizationMember>(
            "SELECT id, org_id, user_id, role, created_at FROM organization_members WHERE org_id = $1 ORDER BY created_at ASC",
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}
