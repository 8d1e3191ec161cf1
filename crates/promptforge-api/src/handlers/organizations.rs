//! Organization and membership handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::authorize::require_role;
use crate::auth::models::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use promptforge_core::models::{generate_slug, OrgRole, Organization, OrganizationMember};
use promptforge_core::AppError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrganizationRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
    pub role: OrgRole,
}

/// Create an organization; the creator becomes its owner.
#[utoipa::path(
    post,
    path = "/api/v1/organizations",
    tag = "organizations",
    request_body = CreateOrganizationRequest,
    responses(
        (status = 201, description = "Organization created", body = Organization),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn create_organization(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    ValidatedJson(request): ValidatedJson<CreateOrganizationRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()).into());
    }

    let slug = generate_slug(name);
    let org = state
        .db
        .organizations
        .create_with_owner(name, &slug, ctx.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(org)))
}

/// List organizations the caller belongs to.
#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    tag = "organizations",
    responses(
        (status = 200, description = "Caller's organizations", body = [Organization])
    )
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_organizations(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let orgs = state.db.organizations.list_for_user(ctx.user_id).await?;
    Ok(Json(orgs))
}

/// Get a single organization. Requires membership.
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{org_id}",
    tag = "organizations",
    params(("org_id" = Uuid, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization", body = Organization),
        (status = 403, description = "Not a member", body = crate::error::ErrorResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_organization(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Viewer).await?;

    let org = state
        .db
        .organizations
        .get(org_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))?;

    Ok(Json(org))
}

/// Add a member to an organization. Requires ADMIN or OWNER role.
#[utoipa::path(
    post,
    path = "/api/v1/organizations/{org_id}/members",
    tag = "organizations",
    params(("org_id" = Uuid, Path, description = "Organization ID")),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added", body = OrganizationMember),
        (status = 400, description = "Already a member", body = crate::error::ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn add_member(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(org_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<AddMemberRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Admin).await?;

    state
        .db
        .users
        .get_by_id(request.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let member = state
        .db
        .memberships
        .add_member(org_id, request.user_id, request.role)
        .await?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// List members of an organization. Requires VIEWER or higher role.
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{org_id}/members",
    tag = "organizations",
    params(("org_id" = Uuid, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Members", body = [OrganizationMember]),
        (status = 403, description = "Not a member", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_members(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Viewer).await?;

    let members = state.db.memberships.list_members(org_id).await?;
    Ok(Json(members))
}
