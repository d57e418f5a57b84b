// src/state.rs

use crate::backend::BackendClient;
use crate::config::GatewayConfig;

#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub config: GatewayConfig,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        AppState {
            backend: BackendClient::new(&config.backend_url),
            config,
        }
    }
}
