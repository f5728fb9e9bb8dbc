use std::collections::HashMap;
use std::sync::Arc;

use reqwest::{Client, Response};
use serde_json::json;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use tokio::spawn;
use uuid::Uuid;

use session_service::app_router;
use session_service::app_state::AppState;
use session_service::domain::LoginResponse;
use session_service::services::{HashmapSessionStore, TokenProvider};
use session_service::utils::config::Config;
use session_service::utils::{ACCESS_TOKEN_RESPONSE_HEADER, REFRESH_TOKEN_RESPONSE_HEADER};

// 32 zero bytes base64
const SECRET_B64: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

fn set_env_config() {
    std::env::set_var("JWT_ISSUER", "test-issuer");
    std::env::set_var("JWT_AUDIENCE", "test-aud");
    std::env::set_var("ACCESS_TTL_SECONDS", "60");
    std::env::set_var("REFRESH_TTL_SECONDS", "300");
    let keys_json = format!(r#"[{{"kid":"k1","secret_b64":"{SECRET_B64}"}}]"#);
    std::env::set_var("JWT_HS256_KEYS_JSON", keys_json);
    std::env::set_var("JWT_ACTIVE_KID", "k1");
    std::env::set_var("ACCESS_COOKIE_NAME", "access");
    std::env::set_var("REFRESH_COOKIE_NAME", "refresh");
}

/// Credentials a client holds after login.
pub struct Tokens {
    pub ssid: String,
    pub access: String,
    pub refresh: String,
}

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub store: Arc<HashmapSessionStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        set_env_config();
        let config = Arc::new(Config::default().expect("failed to build test config"));
        let store = Arc::new(HashmapSessionStore::new());
        let provider = TokenProvider::new(config.clone(), store.clone());
        let app_state = AppState::new(Arc::new(provider), config);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed binding to an ephemeral port");

        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let server = axum::serve(listener, app_router(app_state));

        spawn(async move {
            if let Err(e) = server.await {
                eprintln!("Test server error: {}", e);
            }
        });

        TestApp {
            address,
            http_client: Client::new(),
            store,
        }
    }

    pub async fn login(&self, body: &serde_json::Value) -> Response {
        self.http_client
            .post(&format!("{}/login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute login request.")
    }

    /// Logs `user_id` in and returns the credentials from the response headers.
    pub async fn login_as(
        &self,
        user_id: &str,
        jwt_data: HashMap<&str, &str>,
        session_data: HashMap<&str, &str>,
    ) -> Tokens {
        let response = self
            .login(&json!({
                "user_id": user_id,
                "jwt_data": jwt_data,
                "session_data": session_data,
            }))
            .await;
        assert_eq!(response.status().as_u16(), 200);

        let access = header(&response, ACCESS_TOKEN_RESPONSE_HEADER);
        let refresh = header(&response, REFRESH_TOKEN_RESPONSE_HEADER);
        let body: LoginResponse = response.json().await.expect("login body");
        Tokens {
            ssid: body.ssid,
            access,
            refresh,
        }
    }

    pub async fn refresh_token(&self, access: Option<&str>, refresh: Option<&str>) -> Response {
        let mut request = self
            .http_client
            .post(&format!("{}/refresh-token", &self.address));
        if let Some(access) = access {
            request = request.bearer_auth(access);
        }
        if let Some(refresh) = refresh {
            request = request.header("x-refresh-token", refresh);
        }
        request
            .send()
            .await
            .expect("Failed to execute refresh token request.")
    }

    pub async fn logout(&self, access: &str) -> Response {
        self.http_client
            .post(&format!("{}/logout", &self.address))
            .bearer_auth(access)
            .send()
            .await
            .expect("Failed to execute logout request.")
    }

    pub async fn get_value(&self, access: &str, key: &str) -> Response {
        self.http_client
            .get(&format!("{}/session/{}", &self.address, key))
            .bearer_auth(access)
            .send()
            .await
            .expect("Failed to execute get value request.")
    }

    pub async fn put_value(&self, access: &str, key: &str, value: &str) -> Response {
        self.http_client
            .put(&format!("{}/session/{}", &self.address, key))
            .bearer_auth(access)
            .json(&json!({ "value": value }))
            .send()
            .await
            .expect("Failed to execute put value request.")
    }

    pub async fn delete_value(&self, access: &str, key: &str) -> Response {
        self.http_client
            .delete(&format!("{}/session/{}", &self.address, key))
            .bearer_auth(access)
            .send()
            .await
            .expect("Failed to execute delete value request.")
    }

    pub async fn get_claims(&self, access: &str) -> Response {
        self.http_client
            .get(&format!("{}/claims", &self.address))
            .bearer_auth(access)
            .send()
            .await
            .expect("Failed to execute get claims request.")
    }

    pub async fn update_claims(&self, access: &str, body: &serde_json::Value) -> Response {
        self.http_client
            .put(&format!("{}/claims", &self.address))
            .bearer_auth(access)
            .json(body)
            .send()
            .await
            .expect("Failed to execute update claims request.")
    }
}

pub struct TestContext {
    pub test_app: TestApp,
}

impl AsyncTestContext for TestContext {
    async fn setup() -> Self {
        TestContext {
            test_app: TestApp::new().await,
        }
    }
}

pub fn header(response: &Response, name: &str) -> String {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing {name} header"))
        .to_str()
        .unwrap()
        .to_owned()
}

pub fn get_random_user_id() -> String {
    Uuid::new_v4().to_string()
}
