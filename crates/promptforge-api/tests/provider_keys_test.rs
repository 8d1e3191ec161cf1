//! BYOK provider key endpoint tests: role gating, ciphertext masking,
//! and registry validation of provider names.

mod helpers;

use axum::http::StatusCode;
use helpers::{api_path, setup_test_app, MOCK_PROVIDER, TEST_PLAINTEXT_KEY};
use promptforge_core::models::OrgRole;
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_provider_key_masks_secret() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org = app.create_org(&owner, "Acme").await;

    let response = app
        .server
        .post(&api_path(&format!("/provider-keys/{}", org.id)))
        .authorization_bearer(&app.token_for(&owner))
        .json(&json!({
            "provider": MOCK_PROVIDER,
            "key_name": "prod",
            "api_key": TEST_PLAINTEXT_KEY,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let key: Value = response.json();
    assert_eq!(key["provider"], MOCK_PROVIDER);
    assert_eq!(key["key_name"], "prod");
    assert_eq!(key["is_active"], true);
    // Only a short prefix of the plaintext leaks out, never the ciphertext
    assert_eq!(key["key_prefix"], &TEST_PLAINTEXT_KEY[..10]);
    assert!(key.get("encrypted_key").is_none());
    assert!(!response.text().contains(TEST_PLAINTEXT_KEY));

    // Stored row holds ciphertext, not the plaintext
    let stored: String =
        sqlx::query_scalar("SELECT encrypted_key FROM provider_keys WHERE org_id = $1")
            .bind(org.id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_ne!(stored, TEST_PLAINTEXT_KEY);
    assert!(!stored.contains(TEST_PLAINTEXT_KEY));
}

#[tokio::test]
async fn test_create_provider_key_requires_admin() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let member = app.create_user("member@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    app.add_member(org.id, &member, OrgRole::Member).await;

    let response = app
        .server
        .post(&api_path(&format!("/provider-keys/{}", org.id)))
        .authorization_bearer(&app.token_for(&member))
        .json(&json!({
            "provider": MOCK_PROVIDER,
            "key_name": "prod",
            "api_key": TEST_PLAINTEXT_KEY,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_provider_key_rejects_unknown_provider() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org = app.create_org(&owner, "Acme").await;

    let response = app
        .server
        .post(&api_path(&format!("/provider-keys/{}", org.id)))
        .authorization_bearer(&app.token_for(&owner))
        .json(&json!({
            "provider": "nosuch",
            "key_name": "prod",
            "api_key": TEST_PLAINTEXT_KEY,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNSUPPORTED_PROVIDER");
}

#[tokio::test]
async fn test_create_provider_key_rejects_empty_key() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org = app.create_org(&owner, "Acme").await;

    let response = app
        .server
        .post(&api_path(&format!("/provider-keys/{}", org.id)))
        .authorization_bearer(&app.token_for(&owner))
        .json(&json!({
            "provider": MOCK_PROVIDER,
            "key_name": "prod",
            "api_key": "",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_provider_keys_is_masked_and_member_visible() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let member = app.create_user("member@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    app.add_member(org.id, &member, OrgRole::Member).await;
    app.seed_provider_key(org.id, MOCK_PROVIDER).await;

    let response = app
        .server
        .get(&api_path(&format!("/provider-keys/{}", org.id)))
        .authorization_bearer(&app.token_for(&member))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let keys: Vec<Value> = response.json();
    assert_eq!(keys.len(), 1);
    assert!(keys[0].get("encrypted_key").is_none());
    assert!(!response.text().contains(TEST_PLAINTEXT_KEY));
}

#[tokio::test]
async fn test_delete_provider_key() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    let key = app.seed_provider_key(org.id, MOCK_PROVIDER).await;
    let token = app.token_for(&owner);

    let path = api_path(&format!("/provider-keys/{}/{}", org.id, key.id));

    let response = app
        .server
        .delete(&path)
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    // Second delete finds nothing
    let response = app
        .server
        .delete(&path)
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_provider_key_requires_admin() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let member = app.create_user("member@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    app.add_member(org.id, &member, OrgRole::Member).await;
    let key = app.seed_provider_key(org.id, MOCK_PROVIDER).await;

    let response = app
        .server
        .delete(&api_path(&format!("/provider-keys/{}/{}", org.id, key.id)))
        .authorization_bearer(&app.token_for(&member))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}
