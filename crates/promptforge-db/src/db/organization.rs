use promptforge_core::{
    models::{OrgRole, Organization},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for organizations (tenant boundary)
#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an organization and its owner membership in one transaction.
    #[tracing::instrument(skip(self), fields(db.table = "organizations", db.operation = "insert"))]
    pub async fn create_with_owner(
        &self,
        name: &str,
        slug: &str,
        owner_user_id: Uuid,
    ) -> Result<Organization, AppError> {
        let mut tx = self.pool.begin().await?;

        // Slug collisions get a random suffix rather than an error
        let slug_taken = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM organizations WHERE slug = $1)",
        )
        .bind(slug)
        .fetch_one(&mut *tx)
        .await?;

        let final_slug = if slug_taken {
            format!("{}-{}", slug, &Uuid::new_v4().to_string()[..8])
        } else {
            slug.to_string()
        };

        let org = sqlx::query_as::<Postgres, Organization>(
            r#"
            INSERT INTO organizations (name, slug)
            VALUES ($1, $2)
            RETURNING id, name, slug, created_at
            "#,
        )
        .bind(name)
        .bind(&final_slug)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO organization_members (org_id, user_id, role) VALUES ($1, $2, $3)",
        )
        .bind(org.id)
        .bind(owner_user_id)
        .bind(OrgRole::Owner)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(org)
    }

    /// Get an organization by ID.
    #[tracing::instrument(skip(self), fields(db.table = "organizations", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Organization>, AppError> {
        let org = sqlx::query_as::<Postgres, Organization>(
            "SELECT id, name, slug, created_at FROM organizations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(org)
    }

    /// List organizations the user belongs to.
    #[tracing::instrument(skip(self), fields(db.table = "organizations", db.operation = "select"))]
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Organization>, AppError> {
        let orgs = sqlx::query_as::<Postgres, Organization>(
            r#"
            SELECT o.id, o.name, o.slug, o.created_at
            FROM organizations o
            JOIN organization_members m ON m.org_id = o.id
            WHERE m.user_id = $1
            ORDER BY o.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orgs)
    }
}
