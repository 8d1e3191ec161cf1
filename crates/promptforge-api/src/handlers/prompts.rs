//! Prompt and prompt version handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::authorize::require_role;
use crate::auth::models::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use promptforge_core::models::{generate_slug, OrgRole, Prompt, PromptVersion};
use promptforge_core::AppError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePromptRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVersionRequest {
    pub content: String,
    pub model: String,
    pub provider: String,
    /// Opaque generation parameters (temperature, max_tokens, vendor extras)
    pub parameters: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromptWithVersions {
    #[serde(flatten)]
    pub prompt: Prompt,
    pub versions: Vec<PromptVersion>,
}

/// Create a prompt. Requires MEMBER or higher role.
#[utoipa::path(
    post,
    path = "/api/v1/prompts/{org_id}",
    tag = "prompts",
    params(("org_id" = Uuid, Path, description = "Organization ID")),
    request_body = CreatePromptRequest,
    responses(
        (status = 201, description = "Prompt created", body = Prompt),
        (status = 403, description = "Insufficient permissions", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn create_prompt(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(org_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CreatePromptRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Member).await?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()).into());
    }

    let slug = generate_slug(name);
    let prompt = state
        .db
        .prompts
        .create_prompt(org_id, name, &slug, request.description.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(prompt)))
}

/// List prompts in an organization. Requires MEMBER or higher role.
#[utoipa::path(
    get,
    path = "/api/v1/prompts/{org_id}",
    tag = "prompts",
    params(("org_id" = Uuid, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Prompts", body = [Prompt]),
        (status = 403, description = "Not a member", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_prompts(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Member).await?;

    let prompts = state.db.prompts.list_prompts(org_id).await?;
    Ok(Json(prompts))
}

/// Get a prompt with its full version history. Requires MEMBER or higher role.
#[utoipa::path(
    get,
    path = "/api/v1/prompts/{org_id}/{prompt_id}",
    tag = "prompts",
    params(
        ("org_id" = Uuid, Path, description = "Organization ID"),
        ("prompt_id" = Uuid, Path, description = "Prompt ID")
    ),
    responses(
        (status = 200, description = "Prompt with versions", body = PromptWithVersions),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_prompt(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path((org_id, prompt_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Member).await?;

    let prompt = state
        .db
        .prompts
        .get_prompt(org_id, prompt_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))?;

    let versions = state.db.prompts.list_versions(prompt_id).await?;

    Ok(Json(PromptWithVersions { prompt, versions }))
}

/// Create a new version of a prompt. Requires MEMBER or higher role.
///
/// Version numbers are assigned serially per prompt; concurrent creators
/// each get a distinct consecutive number.
#[utoipa::path(
    post,
    path = "/api/v1/prompts/{org_id}/{prompt_id}/versions",
    tag = "prompts",
    params(
        ("org_id" = Uuid, Path, description = "Organization ID"),
        ("prompt_id" = Uuid, Path, description = "Prompt ID")
    ),
    request_body = CreateVersionRequest,
    responses(
        (status = 201, description = "Version created", body = PromptVersion),
        (status = 404, description = "Prompt not found", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn create_version(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path((org_id, prompt_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(request): ValidatedJson<CreateVersionRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Member).await?;

    if request.content.trim().is_empty() {
        return Err(AppError::BadRequest("content is required".to_string()).into());
    }

    let version = state
        .db
        .prompts
        .create_version(
            org_id,
            prompt_id,
            &request.content,
            &request.model,
            &request.provider.to_lowercase(),
            request.parameters,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(version)))
}

/// List versions of a prompt, newest first. Requires MEMBER or higher role.
#[utoipa::path(
    get,
    path = "/api/v1/prompts/{org_id}/{prompt_id}/versions",
    tag = "prompts",
    params(
        ("org_id" = Uuid, Path, description = "Organization ID"),
        ("prompt_id" = Uuid, Path, description = "Prompt ID")
    ),
    responses(
        (status = 200, description = "Versions", body = [PromptVersion]),
        (status = 404, description = "Prompt not found", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_versions(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path((org_id, prompt_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Member).await?;

    state
        .db
        .prompts
        .get_prompt(org_id, prompt_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))?;

    let versions = state.db.prompts.list_versions(prompt_id).await?;
    Ok(Json(versions))
}
