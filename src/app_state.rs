use std::sync::Arc;

use crate::domain::Provider;
use crate::utils::Config;

// Using type aliases to improve readability!
pub type ProviderType = Arc<dyn Provider>;
pub type ConfigType = Arc<Config>;

/// Composition root: the one place a provider is wired in. Handlers and the
/// middleware reach it through axum state, never through a global.
#[derive(Clone)]
pub struct AppState {
    pub provider: ProviderType,
    pub config: ConfigType,
}

impl AppState {
    pub fn new(provider: ProviderType, config: ConfigType) -> Self {
        Self { provider, config }
    }
}
