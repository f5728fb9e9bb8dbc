use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::{error::Error, future::Future, pin::Pin};
use tokio::net::TcpListener;

use app_state::AppState;
use routes::{claims, login, logout, refresh_token, session_data};

pub mod app_state;
pub mod domain;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod utils;

type ServerFuture = Pin<Box<dyn Future<Output = Result<(), std::io::Error>> + Send>>;

pub fn app_router(app_state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/session/:key",
            get(session_data::get_value)
                .put(session_data::put_value)
                .delete(session_data::delete_value),
        )
        .route("/claims", get(claims::get_claims).put(claims::update_claims))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_session,
        ));

    Router::new()
        .route("/login", post(login::login))
        .route("/refresh-token", post(refresh_token::refresh_token))
        .route("/logout", post(logout::logout))
        .merge(protected)
        .with_state(app_state)
}

// This struct encapsulates our application-related logic.
pub struct Application {
    http_future: ServerFuture,
    // address is exposed as a public field,
    // so we have access to it in tests.
    pub address: String,
}

impl Application {
    pub async fn build(app_state: AppState, address: &str) -> Result<Self, Box<dyn Error>> {
        let router = app_router(app_state);
        let listener = TcpListener::bind(address).await?;
        let address = format!("http://{}", listener.local_addr()?);

        let http_future = async move { axum::serve(listener, router).await };

        Ok(Self {
            http_future: Box::pin(http_future),
            address,
        })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        log::info!("listening on {}", &self.address);
        self.http_future.await
    }
}
