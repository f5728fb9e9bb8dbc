use std::collections::HashMap;

use test_context::test_context;

use session_service::services::record_key;

use crate::helpers::{get_random_user_id, header, TestContext};

#[test_context(TestContext)]
#[tokio::test]
async fn should_return_401_if_refresh_credential_missing(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    let tokens = app
        .login_as(&get_random_user_id(), HashMap::new(), HashMap::new())
        .await;

    let response = app.refresh_token(Some(&tokens.access), None).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_return_401_if_access_credential_missing(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    let tokens = app
        .login_as(&get_random_user_id(), HashMap::new(), HashMap::new())
        .await;

    let response = app.refresh_token(None, Some(&tokens.refresh)).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_return_200_with_new_access_credential(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    let tokens = app
        .login_as("42", HashMap::from([("role", "admin")]), HashMap::new())
        .await;

    let response = app
        .refresh_token(Some(&tokens.access), Some(&tokens.refresh))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let access = header(&response, "x-access-token");
    assert_ne!(access, tokens.access);
    assert!(response.headers().get("x-refresh-token").is_none());
    assert!(response.cookies().any(|cookie| cookie.name() == "access"));

    let response = app.get_claims(&access).await;
    assert_eq!(response.status().as_u16(), 200);
    let claims: serde_json::Value = response.json().await.unwrap();
    assert_eq!(claims["ssid"], tokens.ssid);
    assert_eq!(claims["data"]["role"], "admin");
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_return_401_if_credentials_from_different_sessions(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    let first = app.login_as("42", HashMap::new(), HashMap::new()).await;
    let second = app.login_as("42", HashMap::new(), HashMap::new()).await;

    let response = app
        .refresh_token(Some(&first.access), Some(&second.refresh))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_return_401_once_record_expired(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    let tokens = app
        .login_as(&get_random_user_id(), HashMap::new(), HashMap::new())
        .await;

    app.store
        .expire_now(&record_key("session:", &tokens.ssid))
        .await;

    let response = app
        .refresh_token(Some(&tokens.access), Some(&tokens.refresh))
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestContext)]
#[tokio::test]
async fn should_accept_credentials_from_cookies(ctx: &mut TestContext) {
    let app = &ctx.test_app;
    let tokens = app
        .login_as(&get_random_user_id(), HashMap::new(), HashMap::new())
        .await;

    let response = app
        .http_client
        .post(&format!("{}/refresh-token", &app.address))
        .header(
            "Cookie",
            format!("access={}; refresh={}", tokens.access, tokens.refresh),
        )
        .send()
        .await
        .expect("Failed to execute refresh token request.");

    assert_eq!(response.status().as_u16(), 200);
}
