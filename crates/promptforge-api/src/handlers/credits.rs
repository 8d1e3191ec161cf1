//! Credit ledger handlers.
//!
//! The ledger is append-only: balances are derived by summation and
//! corrections are offsetting entries, never row mutations.

use axum::{
    extract::{Path, Query, State},
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
use promptforge_core::models::{CreditLedgerEntry, OrgRole};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCreditsRequest {
    /// Credits to add; must be positive.
    pub amount: i64,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    pub org_id: Uuid,
    pub balance: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Current credit balance. Requires VIEWER or higher role.
#[utoipa::path(
    get,
    path = "/api/v1/credits/{org_id}/balance",
    tag = "credits",
    params(("org_id" = Uuid, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Current balance", body = BalanceResponse),
        (status = 403, description = "Not a member", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(org_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Viewer).await?;

    let balance = state.db.ledger.balance(org_id).await?;
    Ok(Json(BalanceResponse { org_id, balance }))
}

/// Append a credit entry. Requires OWNER role.
#[utoipa::path(
    post,
    path = "/api/v1/credits/{org_id}",
    tag = "credits",
    params(("org_id" = Uuid, Path, description = "Organization ID")),
    request_body = AddCreditsRequest,
    responses(
        (status = 201, description = "Entry appended", body = CreditLedgerEntry),
        (status = 400, description = "Invalid amount", body = crate::error::ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn add_credits(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(org_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<AddCreditsRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Owner).await?;

    let description = request
        .description
        .as_deref()
        .unwrap_or("Credit purchase");

    let entry = state
        .db
        .ledger
        .credit(org_id, request.amount, description)
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// List ledger entries, newest first. Requires VIEWER or higher role.
#[utoipa::path(
    get,
    path = "/api/v1/credits/{org_id}",
    tag = "credits",
    params(
        ("org_id" = Uuid, Path, description = "Organization ID"),
        ("limit" = Option<i64>, Query, description = "Page size (1-100, default 50)"),
        ("offset" = Option<i64>, Query, description = "Page offset")
    ),
    responses(
        (status = 200, description = "Ledger entries, newest first", body = [CreditLedgerEntry]),
        (status = 403, description = "Not a member", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_ledger_entries(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(org_id): Path<Uuid>,
    Query(query): Query<ListEntriesQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_role(&state.db.memberships, org_id, ctx.user_id, OrgRole::Viewer).await?;

    let limit = query.limit.clamp(1, 100);
    let offset = query.offset.max(0);

    let entries = state.db.ledger.list_entries(org_id, limit, offset).await?;
    Ok(Json(entries))
}
