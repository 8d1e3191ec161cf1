//! BYOK provider key handlers.
//!
//! Plaintext API keys exist only inside the create handler; what is stored
//! is the vault ciphertext plus a short display prefix, and what is returned
//! is always the masked representation.

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
use promptforge_core::models::{OrgRole, ProviderKey};
use promptforge_core::vault::key_prefix;
use promptforge_core::AppError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProviderKeyRequest {
    pub provider: String,
    pub key_name: String,
    /// Plaintext vendor API key; never stored or echoed back.
    pub api_key: String,
}

/// Add a BYOK provider key. Requires ADMIN or OWNER role.
#[utoipa::path(
    post,
    path = "/api/v1/provider-keys/{org_id}",
    tag = "provider-keys",
    params(("org_id" = Uuid, Path, description = "Organization ID")),
    request_body = CreateProviderKeyRequest,
    responses(
        (status = 201, description = "Key stored (masked)", body = ProviderKey),
        (status = 400, description = "Unsupported provider", body = crate::error::ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn create_provider_key(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(org_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateProviderKeyRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Admin).await?;

    if request.api_key.trim().is_empty() {
        return Err(AppError::BadRequest("api_key is required".to_string()).into());
    }

    let provider = request.provider.to_lowercase();
    // Reject names no adapter exists for before encrypting anything
    state.providers.get(&provider)?;

    let encrypted = state.vault.encrypt(&request.api_key)?;
    let prefix = key_prefix(&request.api_key);

    let key = state
        .db
        .provider_keys
        .create(org_id, &provider, &request.key_name, &encrypted, &prefix)
        .await?;

    Ok((StatusCode::CREATED, Json(key)))
}

/// List provider keys (masked). Requires MEMBER or higher role.
#[utoipa::path(
    get,
    path = "/api/v1/provider-keys/{org_id}",
    tag = "provider-keys",
    params(("org_id" = Uuid, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Keys (masked)", body = [ProviderKey]),
        (status = 403, description = "Not a member", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_provider_keys(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Member).await?;

    let keys = state.db.provider_keys.list(org_id).await?;
    Ok(Json(keys))
}

/// Delete a provider key. Requires ADMIN or OWNER role.
#[utoipa::path(
    delete,
    path = "/api/v1/provider-keys/{org_id}/{key_id}",
    tag = "provider-keys",
    params(
        ("org_id" = Uuid, Path, description = "Organization ID"),
        ("key_id" = Uuid, Path, description = "Provider key ID")
    ),
    responses(
        (status = 204, description = "Key deleted"),
        (status = 404, description = "Key not found", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_provider_key(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path((org_id, key_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Admin).await?;

    let deleted = state.db.provider_keys.delete(org_id, key_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Provider key not found".to_string()).into());
    }

    Ok(StatusCode::NO_CONTENT)
}
