use std::sync::Arc;

use session_service::app_state::AppState;
use session_service::services::{RedisService, RedisSessionStore, TokenProvider};
use session_service::utils::Config;
use session_service::Application;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Arc::new(Config::default().expect("Failed to load config"));
    let redis_service = Arc::new(
        RedisService::connect(config.redis_host(), config.backend_timeout())
            .await
            .expect("Failed to connect to redis"),
    );
    let store = Arc::new(RedisSessionStore::new(redis_service));
    let provider = Arc::new(TokenProvider::new(config.clone(), store));

    let app_state = AppState::new(provider, config);
    let app = Application::build(app_state, "0.0.0.0:3000")
        .await
        .expect("Failed to build app");

    app.run().await.expect("Failed to run app");
}
