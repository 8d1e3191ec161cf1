//! Prompt execution handler.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::authorize::require_role;
use crate::auth::models::AuthContext;
use crate::error::{HttpAppError, ValidatedJson};
use crate::services::ExecutionRequest;
use crate::state::AppState;
use promptforge_core::models::{Generation, OrgRole};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ExecutePromptRequest {
    /// Values substituted into `${name}` placeholders in the prompt body.
    #[serde(default)]
    pub variables: HashMap<String, String>,
    /// Run against a different model than the version specifies.
    pub model_override: Option<String>,
}

/// Execute the latest version of a prompt using BYOK provider keys.
/// Requires MEMBER or higher role.
#[utoipa::path(
    post,
    path = "/api/v1/executions/{org_id}/{prompt_id}/execute",
    tag = "executions",
    params(
        ("org_id" = Uuid, Path, description = "Organization ID"),
        ("prompt_id" = Uuid, Path, description = "Prompt ID")
    ),
    request_body = ExecutePromptRequest,
    responses(
        (status = 200, description = "Execution recorded", body = Generation),
        (status = 400, description = "No versions / no key / unsupported provider", body = crate::error::ErrorResponse),
        (status = 402, description = "Insufficient credits", body = crate::error::ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = crate::error::ErrorResponse),
        (status = 404, description = "Prompt not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Provider call failed", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx, request), fields(org_id = %org_id, prompt_id = %prompt_id))]
pub async fn execute_prompt(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path((org_id, prompt_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(request): ValidatedJson<ExecutePromptRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Member).await?;

    let generation = state
        .executions
        .execute(
            org_id,
            prompt_id,
            ctx.user_id,
            ExecutionRequest {
                variables: request.variables,
                model_override: request.model_override,
            },
        )
        .await?;

    Ok(Json(generation))
}
