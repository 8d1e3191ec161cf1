//! Generation history handlers.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorize::require_role;
use crate::auth::models::AuthContext;
use crate::error::HttpAppError;
use crate::state::AppState;
use promptforge_core::models::{Generation, OrgRole};
use promptforge_core::AppError;

#[derive(Debug, Deserialize)]
pub struct ListGenerationsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// List generations for an organization, newest first. Requires VIEWER or higher role.
#[utoipa::path(
    get,
    path = "/api/v1/generations/{org_id}",
    tag = "generations",
    params(
        ("org_id" = Uuid, Path, description = "Organization ID"),
        ("limit" = Option<i64>, Query, description = "Page size (1-100, default 50)"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Generations, newest first", body = [Generation]),
        (status = 403, description = "Not a member", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_generations(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(org_id): Path<Uuid>,
    Query(query): Query<ListGenerationsQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Viewer).await?;

    let limit = query.limit.clamp(1, 100);
    let offset = query.offset.max(0);

    let generations = state.db.generations.list(org_id, limit, offset).await?;
    Ok(Json(generations))
}

/// Get a single generation. Requires VIEWER or higher role.
#[utoipa::path(
    get,
    path = "/api/v1/generations/{org_id}/{generation_id}",
    tag = "generations",
    params(
        ("org_id" = Uuid, Path, description = "Organization ID"),
        ("generation_id" = Uuid, Path, description = "Generation ID")
    ),
    responses(
        (status = 200, description = "Generation", body = Generation),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_generation(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path((org_id, generation_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Viewer).await?;

    let generation = state
        .db
        .generations
        .get(org_id, generation_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Generation not found".to_string()))?;

    Ok(Json(generation))
}
