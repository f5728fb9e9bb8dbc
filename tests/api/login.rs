use std::collections::HashMap;

use serde_json::json;
use test_context::test_context;

use session_service::domain::LoginResponse;

use crate::helpers::{get_random_user_id, header, TestContext};

#[test_context(TestContext)]
#[tokio::test]
async fn should_return_422_if_malformed_input(ctx: &mut TestContext) {
    let app = &ctx.test_app;

    let response = app.login(&json!({ "jwt_data": {} })).await;

    assert_eq!(response.status().as_u16(), 422);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_return_401_if_user_id_blank(ctx: &mut TestContext) {
    let app = &ctx.test_app;

    let response = app.login(&json!({ "user_id": "  " })).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_return_200_and_issue_both_credentials(ctx: &mut TestContext) {
    let app = &ctx.test_app;

    let response = app
        .login(&json!({
            "user_id": get_random_user_id(),
            "jwt_data": { "role": "admin" },
            "session_data": { "cart": "[]" },
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(!header(&response, "x-access-token").is_empty());
    assert!(!header(&response, "x-refresh-token").is_empty());

    let access_cookie = response
        .cookies()
        .find(|cookie| cookie.name() == "access")
        .expect("No access cookie found");
    assert!(!access_cookie.value().is_empty());
    assert_eq!(access_cookie.path(), Some("/"));
    assert!(access_cookie.http_only());

    let refresh_cookie = response
        .cookies()
        .find(|cookie| cookie.name() == "refresh")
        .expect("No refresh cookie found");
    assert_eq!(refresh_cookie.path(), Some("/refresh-token"));

    let body: LoginResponse = response.json().await.unwrap();
    assert!(!body.ssid.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_seed_session_data(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    let tokens = app
        .login_as(
            "42",
            HashMap::from([("role", "admin")]),
            HashMap::from([("cart", "[]")]),
        )
        .await;

    let response = app.get_value(&tokens.access, "cart").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "value": "[]" }));
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_issue_a_new_ssid_per_login(ctx: &mut TestContext) {
    let app = &ctx.test_app;

    let first = app.login_as("42", HashMap::new(), HashMap::new()).await;
    let second = app.login_as("42", HashMap::new(), HashMap::new()).await;

    assert_ne!(first.ssid, second.ssid);
}
