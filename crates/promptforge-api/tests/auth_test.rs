//! Authentication middleware tests: public routes, token validation, and
//! active-user enforcement.

mod helpers;

use axum::http::StatusCode;
use helpers::{api_path, setup_test_app};
use serde_json::Value;

#[tokio::test]
async fn test_health_is_public() {
    let app = setup_test_app().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_spec_is_public() {
    let app = setup_test_app().await;

    let response = app.server.get("/api/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let spec: Value = response.json();
    assert!(spec["paths"]
        .as_object()
        .unwrap()
        .contains_key("/api/v1/executions/{org_id}/{prompt_id}/execute"));
}

#[tokio::test]
async fn test_protected_route_without_token_is_401() {
    let app = setup_test_app().await;

    let response = app.server.get(&api_path("/organizations")).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_401() {
    let app = setup_test_app().await;

    let response = app
        .server
        .get(&api_path("/organizations"))
        .authorization_bearer("not-a-jwt")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_unknown_user_is_401() {
    let app = setup_test_app().await;
    let token =
        promptforge_api::auth::jwt::create_token(uuid::Uuid::new_v4(), helpers::TEST_JWT_SECRET, 1)
            .unwrap();

    let response = app
        .server
        .get(&api_path("/organizations"))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deactivated_user_is_rejected() {
    let app = setup_test_app().await;
    let user = app.create_user("ghost@example.com").await;
    let token = app.token_for(&user);

    // Token is valid until the account is deactivated
    let response = app
        .server
        .get(&api_path("/organizations"))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(user.id)
        .execute(&app.pool)
        .await
        .unwrap();

    let response = app
        .server
        .get(&api_path("/organizations"))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
