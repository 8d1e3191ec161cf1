//! Route configuration and setup.

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Json, Router,
};
use promptforge_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let auth_state = Arc::new(AuthState {
        jwt_secret: config.jwt_secret.clone(),
        user_repository: state.db.users.clone(),
    });

    let public_routes = public_routes();
    let protected_routes = protected_routes().layer(axum::middleware::from_fn_with_state(
        auth_state,
        auth_middleware,
    ));

    let app = public_routes
        .merge(protected_routes)
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::openapi_spec()) }),
        )
}

fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Organizations
        .route(
            "/api/v1/organizations",
            post(handlers::organizations::create_organization)
                .get(handlers::organizations::list_organizations),
        )
        .route(
            "/api/v1/organizations/{org_id}",
            get(handlers::organizations::get_organization),
        )
        .route(
            "/api/v1/organizations/{org_id}/members",
            post(handlers::organizations::add_member).get(handlers::organizations::list_members),
        )
        // Prompts and versions
        .route(
            "/api/v1/prompts/{org_id}",
            post(handlers::prompts::create_prompt).get(handlers::prompts::list_prompts),
        )
        .route(
            "/api/v1/prompts/{org_id}/{prompt_id}",
            get(handlers::prompts::get_prompt),
        )
        .route(
            "/api/v1/prompts/{org_id}/{prompt_id}/versions",
            post(handlers::prompts::create_version).get(handlers::prompts::list_versions),
        )
        // BYOK provider keys
        .route(
            "/api/v1/provider-keys/{org_id}",
            post(handlers::provider_keys::create_provider_key)
                .get(handlers::provider_keys::list_provider_keys),
        )
        .route(
            "/api/v1/provider-keys/{org_id}/{key_id}",
            delete(handlers::provider_keys::delete_provider_key),
        )
        // Generation history
        .route(
            "/api/v1/generations/{org_id}",
            get(handlers::generations::list_generations),
        )
        .route(
            "/api/v1/generations/{org_id}/{generation_id}",
            get(handlers::generations::get_generation),
        )
        // Credit ledger
        .route(
            "/api/v1/credits/{org_id}/balance",
            get(handlers::credits::get_balance),
        )
        .route(
            "/api/v1/credits/{org_id}",
            post(handlers::credits::add_credits).get(handlers::credits::list_ledger_entries),
        )
        // Execution engine
        .route(
            "/api/v1/executions/{org_id}/{prompt_id}/execute",
            post(handlers::executions::execute_prompt),
        )
}
