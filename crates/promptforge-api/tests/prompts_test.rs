//! Prompt and version endpoint tests.

mod helpers;

use axum::http::StatusCode;
use helpers::{api_path, setup_test_app, MOCK_PROVIDER};
use promptforge_core::models::OrgRole;
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_prompt_requires_member_role() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let viewer = app.create_user("viewer@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    app.add_member(org.id, &viewer, OrgRole::Viewer).await;

    let path = api_path(&format!("/prompts/{}", org.id));

    let response = app
        .server
        .post(&path)
        .authorization_bearer(&app.token_for(&viewer))
        .json(&json!({"name": "Summarizer"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .post(&path)
        .authorization_bearer(&app.token_for(&owner))
        .json(&json!({"name": "Summarizer", "description": "Summarizes articles"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let prompt: Value = response.json();
    assert_eq!(prompt["name"], "Summarizer");
    assert_eq!(prompt["slug"], "summarizer");
    assert_eq!(prompt["description"], "Summarizes articles");
}

#[tokio::test]
async fn test_version_numbers_are_sequential() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    let prompt = app.seed_prompt(org.id, "Summarizer").await;
    let token = app.token_for(&owner);

    let path = api_path(&format!("/prompts/{}/{}/versions", org.id, prompt.id));
    for (i, content) in ["v1 body", "v2 body", "v3 body"].iter().enumerate() {
        let response = app
            .server
            .post(&path)
            .authorization_bearer(&token)
            .json(&json!({
                "content": content,
                "model": "mock-model-1",
                "provider": MOCK_PROVIDER,
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let version: Value = response.json();
        assert_eq!(version["version"], (i + 1) as i64);
    }

    let response = app
        .server
        .get(&path)
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let versions: Vec<Value> = response.json();
    assert_eq!(versions.len(), 3);
}

/// Concurrent version creation must still yield a gapless, duplicate-free
/// sequence; the per-prompt row lock serializes the number assignment.
#[tokio::test]
async fn test_concurrent_version_creation_assigns_unique_numbers() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    let prompt = app.seed_prompt(org.id, "Summarizer").await;
    let token = app.token_for(&owner);

    let path = api_path(&format!("/prompts/{}/{}/versions", org.id, prompt.id));
    let requests = (0..5).map(|i| {
        let path = &path;
        let token = &token;
        let server = &app.server;
        async move {
            server
                .post(path)
                .authorization_bearer(token)
                .json(&json!({
                    "content": format!("body {i}"),
                    "model": "mock-model-1",
                    "provider": MOCK_PROVIDER,
                }))
                .await
        }
    });
    let responses = futures::future::join_all(requests).await;

    let mut versions = Vec::new();
    for response in responses {
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body: Value = response.json();
        versions.push(body["version"].as_i64().unwrap());
    }
    versions.sort_unstable();
    assert_eq!(versions, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_create_version_stores_parameters_and_lowercases_provider() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    let prompt = app.seed_prompt(org.id, "Summarizer").await;

    let response = app
        .server
        .post(&api_path(&format!(
            "/prompts/{}/{}/versions",
            org.id, prompt.id
        )))
        .authorization_bearer(&app.token_for(&owner))
        .json(&json!({
            "content": "Summarize: ${text}",
            "model": "mock-model-1",
            "provider": "MockAI",
            "parameters": {"temperature": 0.2, "max_tokens": 256},
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let version: Value = response.json();
    assert_eq!(version["provider"], MOCK_PROVIDER);
    assert_eq!(version["parameters"]["temperature"], 0.2);
    assert_eq!(version["parameters"]["max_tokens"], 256);
}

#[tokio::test]
async fn test_create_version_rejects_empty_content() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    let prompt = app.seed_prompt(org.id, "Summarizer").await;

    let response = app
        .server
        .post(&api_path(&format!(
            "/prompts/{}/{}/versions",
            org.id, prompt.id
        )))
        .authorization_bearer(&app.token_for(&owner))
        .json(&json!({
            "content": "  ",
            "model": "mock-model-1",
            "provider": MOCK_PROVIDER,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_prompt_includes_versions() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    let prompt = app.seed_prompt(org.id, "Summarizer").await;
    app.seed_version(org.id, prompt.id, "first", MOCK_PROVIDER).await;
    app.seed_version(org.id, prompt.id, "second", MOCK_PROVIDER).await;

    let response = app
        .server
        .get(&api_path(&format!("/prompts/{}/{}", org.id, prompt.id)))
        .authorization_bearer(&app.token_for(&owner))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["name"], "Summarizer");
    assert_eq!(body["versions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_prompts_scoped_to_org() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org_a = app.create_org(&owner, "Org A").await;
    let org_b = app.create_org(&owner, "Org B").await;
    app.seed_prompt(org_a.id, "Only In A").await;

    let token = app.token_for(&owner);
    let response = app
        .server
        .get(&api_path(&format!("/prompts/{}", org_a.id)))
        .authorization_bearer(&token)
        .await;
    let prompts: Vec<Value> = response.json();
    assert_eq!(prompts.len(), 1);

    let response = app
        .server
        .get(&api_path(&format!("/prompts/{}", org_b.id)))
        .authorization_bearer(&token)
        .await;
    let prompts: Vec<Value> = response.json();
    assert!(prompts.is_empty());
}

#[tokio::test]
async fn test_get_unknown_prompt_is_404() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org = app.create_org(&owner, "Acme").await;

    let response = app
        .server
        .get(&api_path(&format!(
            "/prompts/{}/{}",
            org.id,
            uuid::Uuid::new_v4()
        )))
        .authorization_bearer(&app.token_for(&owner))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
