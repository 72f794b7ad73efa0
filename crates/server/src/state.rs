// Shared application state.

use std::sync::Arc;

use gatekit_core::AuthConfig;

/// App state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
