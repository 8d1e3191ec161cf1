//! Organization and membership endpoint tests.

mod helpers;

use axum::http::StatusCode;
use helpers::{api_path, setup_test_app};
use promptforge_core::models::OrgRole;
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_organization_makes_caller_owner() {
    let app = setup_test_app().await;
    let user = app.create_user("founder@example.com").await;
    let token = app.token_for(&user);

    let response = app
        .server
        .post(&api_path("/organizations"))
        .authorization_bearer(&token)
        .json(&json!({"name": "Acme Labs"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let org: Value = response.json();
    assert_eq!(org["name"], "Acme Labs");
    assert_eq!(org["slug"], "acme-labs");

    let org_id = org["id"].as_str().unwrap();
    let members = app
        .server
        .get(&api_path(&format!("/organizations/{}/members", org_id)))
        .authorization_bearer(&token)
        .await;
    assert_eq!(members.status_code(), StatusCode::OK);
    let members: Vec<Value> = members.json();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["user_id"].as_str().unwrap(), user.id.to_string());
    assert_eq!(members[0]["role"], "owner");
}

#[tokio::test]
async fn test_create_organization_rejects_blank_name() {
    let app = setup_test_app().await;
    let user = app.create_user("founder@example.com").await;

    let response = app
        .server
        .post(&api_path("/organizations"))
        .authorization_bearer(&app.token_for(&user))
        .json(&json!({"name": "   "}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_organizations_scoped_to_caller() {
    let app = setup_test_app().await;
    let alice = app.create_user("alice@example.com").await;
    let bob = app.create_user("bob@example.com").await;
    app.create_org(&alice, "Alice Org").await;
    app.create_org(&bob, "Bob Org").await;

    let response = app
        .server
        .get(&api_path("/organizations"))
        .authorization_bearer(&app.token_for(&alice))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let orgs: Vec<Value> = response.json();
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0]["name"], "Alice Org");
}

#[tokio::test]
async fn test_get_organization_requires_membership() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let outsider = app.create_user("outsider@example.com").await;
    let org = app.create_org(&owner, "Acme").await;

    let response = app
        .server
        .get(&api_path(&format!("/organizations/{}", org.id)))
        .authorization_bearer(&app.token_for(&outsider))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"], "Not a member of this organization");

    let response = app
        .server
        .get(&api_path(&format!("/organizations/{}", org.id)))
        .authorization_bearer(&app.token_for(&owner))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_add_member_requires_admin() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let member = app.create_user("member@example.com").await;
    let newcomer = app.create_user("newcomer@example.com").await;
    let org = app.create_org(&owner, "Acme").await;
    app.add_member(org.id, &member, OrgRole::Member).await;

    let path = api_path(&format!("/organizations/{}/members", org.id));

    // Plain member cannot add people
    let response = app
        .server
        .post(&path)
        .authorization_bearer(&app.token_for(&member))
        .json(&json!({"user_id": newcomer.id, "role": "viewer"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    // Owner can
    let response = app
        .server
        .post(&path)
        .authorization_bearer(&app.token_for(&owner))
        .json(&json!({"user_id": newcomer.id, "role": "viewer"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let added: Value = response.json();
    assert_eq!(added["role"], "viewer");

    // Adding the same user again is a 400
    let response = app
        .server
        .post(&path)
        .authorization_bearer(&app.token_for(&owner))
        .json(&json!({"user_id": newcomer.id, "role": "member"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_member_unknown_user_is_404() {
    let app = setup_test_app().await;
    let owner = app.create_user("owner@example.com").await;
    let org = app.create_org(&owner, "Acme").await;

    let response = app
        .server
        .post(&api_path(&format!("/organizations/{}/members", org.id)))
        .authorization_bearer(&app.token_for(&owner))
        .json(&json!({"user_id": uuid::Uuid::new_v4(), "role": "member"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
