//! JWT bearer authentication middleware.
//!
//! Every protected route passes through here: the bearer token is validated,
//! the user is loaded and checked for active status, and an [`AuthContext`]
//! is inserted into request extensions.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use promptforge_core::AppError;
use promptforge_db::UserRepository;
use std::sync::Arc;

use crate::auth::jwt;
use crate::auth::models::AuthContext;
use crate::error::HttpAppError;

/// State shared by the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
    pub user_repository: UserRepository,
}

pub async fn auth_middleware(
    State(auth): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, HttpAppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    let claims = jwt::decode_token(token, &auth.jwt_secret)?;

    let user = auth
        .user_repository
        .get_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?;

    if !user.is_active {
        return Err(AppError::Unauthorized("User account is inactive".to_string()).into());
    }

    request.extensions_mut().insert(AuthContext {
        user_id: user.id,
        email: user.email,
    });

    Ok(next.run(request).await)
}
