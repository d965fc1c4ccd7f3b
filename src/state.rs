//! Shared relay state: immutable config plus one pooled upstream HTTP client.

use crate::config::RelayConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Self {
        AppState {
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client (timeouts, proxies) instead of the default one.
    pub fn with_client(config: RelayConfig, http: reqwest::Client) -> Self {
        AppState {
            config: Arc::new(config),
            http,
        }
    }
}
