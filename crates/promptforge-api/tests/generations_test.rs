//! Generation history endpoint tests.

mod helpers;

use axum::http::StatusCode;
use helpers::{api_path, setup_test_app, MOCK_PROVIDER};
use promptforge_core::models::OrgRole;
use serde_json::{json, Value};

async fn run_execution(app: &helpers::TestApp, token: &str, org_id: uuid::Uuid, prompt_id: uuid::Uuid) -> Value {
    let response = app
        .server
        .post(&api_path(&format!(
            "/executions/{}/{}/execute",
            org_id, prompt_id
        )))
        .authorization_bearer(token)
        .json(&json!({"variables": {"name": "Ada"}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn test_list_and_get_generations() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let viewer = app.create_user("viewer@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    app.add_member(org.id, &viewer, OrgRole::Viewer).await;
    app.seed_credits(org.id, 100).await;
    let prompt = app.seed_prompt(org.id, "Greeter").await;
    app.seed_version(org.id, prompt.id, "Hello ${name}", MOCK_PROVIDER).await;
    app.seed_provider_key(org.id, MOCK_PROVIDER).await;

    let owner_token = app.token_for(&owner);
    let first = run_execution(&app, &owner_token, org.id, prompt.id).await;
    run_execution(&app, &owner_token, org.id, prompt.id).await;

    // Viewers can read history
    let response = app
        .server
        .get(&api_path(&format!("/generations/{}", org.id)))
        .authorization_bearer(&app.token_for(&viewer))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let generations: Vec<Value> = response.json();
    assert_eq!(generations.len(), 2);

    let response = app
        .server
        .get(&api_path(&format!(
            "/generations/{}/{}",
            org.id,
            first["id"].as_str().unwrap()
        )))
        .authorization_bearer(&app.token_for(&viewer))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let generation: Value = response.json();
    assert_eq!(generation["output_text"], "echo: Hello Ada");
    assert_eq!(generation["input_variables"]["name"], "Ada");
    assert_eq!(generation["user_id"].as_str().unwrap(), owner.id.to_string());
}

#[tokio::test]
async fn test_pagination_limit() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    app.seed_credits(org.id, 100).await;
    let prompt = app.seed_prompt(org.id, "Greeter").await;
    app.seed_version(org.id, prompt.id, "Hello ${name}", MOCK_PROVIDER).await;
    app.seed_provider_key(org.id, MOCK_PROVIDER).await;

    let token = app.token_for(&owner);
    for _ in 0..3 {
        run_execution(&app, &token, org.id, prompt.id).await;
    }

    let response = app
        .server
        .get(&api_path(&format!("/generations/{}?limit=2", org.id)))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let generations: Vec<Value> = response.json();
    assert_eq!(generations.len(), 2);

    let response = app
        .server
        .get(&api_path(&format!("/generations/{}?limit=2&offset=2", org.id)))
        .authorization_bearer(&token)
        .await;
    let generations: Vec<Value> = response.json();
    assert_eq!(generations.len(), 1);
}

#[tokio::test]
async fn test_get_generation_scoped_to_org() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org_a = app.create_org(&owner, "Org A").await;
    let org_b = app.create_org(&owner, "Org B").await;
    app.seed_credits(org_a.id, 100).await;
    let prompt = app.seed_prompt(org_a.id, "Greeter").await;
    app.seed_version(org_a.id, prompt.id, "Hello ${name}", MOCK_PROVIDER).await;
    app.seed_provider_key(org_a.id, MOCK_PROVIDER).await;

    let token = app.token_for(&owner);
    let generation = run_execution(&app, &token, org_a.id, prompt.id).await;

    // Same generation looked up through another tenant is invisible
    let response = app
        .server
        .get(&api_path(&format!(
            "/generations/{}/{}",
            org_b.id,
            generation["id"].as_str().unwrap()
        )))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
