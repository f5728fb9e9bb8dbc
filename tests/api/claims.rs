use std::collections::HashMap;

use serde_json::json;
use test_context::test_context;

use crate::helpers::{header, TestContext};

#[test_context(TestContext)]
#[tokio::test]
async fn should_return_bound_claims(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    let tokens = app
        .login_as("42", HashMap::from([("role", "admin")]), HashMap::new())
        .await;

    let response = app.get_claims(&tokens.access).await;
    assert_eq!(response.status().as_u16(), 200);

    let claims: serde_json::Value = response.json().await.unwrap();
    assert_eq!(claims["user_id"], "42");
    assert_eq!(claims["ssid"], tokens.ssid);
    assert_eq!(claims["data"]["role"], "admin");
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_return_401_for_foreign_ssid(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    let first = app.login_as("42", HashMap::new(), HashMap::new()).await;
    let second = app.login_as("42", HashMap::new(), HashMap::new()).await;

    let response = app
        .update_claims(
            &first.access,
            &json!({ "ssid": second.ssid, "data": { "role": "owner" } }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_reissue_access_credential_with_new_claims(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    let tokens = app
        .login_as(
            "42",
            HashMap::from([("role", "admin")]),
            HashMap::from([("cart", "[]")]),
        )
        .await;

    let response = app
        .update_claims(
            &tokens.access,
            &json!({ "ssid": tokens.ssid, "data": { "role": "owner" } }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 204);
    assert!(response.headers().get("x-refresh-token").is_none());
    let access = header(&response, "x-access-token");

    let claims: serde_json::Value = app.get_claims(&access).await.json().await.unwrap();
    assert_eq!(claims["data"]["role"], "owner");

    // The old credential still carries the old claims until it expires.
    let claims: serde_json::Value = app.get_claims(&tokens.access).await.json().await.unwrap();
    assert_eq!(claims["data"]["role"], "admin");

    // Backend data is untouched.
    let body: serde_json::Value = app.get_value(&access, "cart").await.json().await.unwrap();
    assert_eq!(body["value"], "[]");
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_return_401_after_logout(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    let tokens = app
        .login_as("42", HashMap::from([("role", "admin")]), HashMap::new())
        .await;

    assert_eq!(app.logout(&tokens.access).await.status().as_u16(), 200);

    let response = app
        .update_claims(
            &tokens.access,
            &json!({ "ssid": tokens.ssid, "data": { "role": "owner" } }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 401);
    assert!(response.headers().get("x-access-token").is_none());
}
