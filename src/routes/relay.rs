//! Relay routes: every method and sub-path under the prefix goes to the same handler.

use crate::handlers::relay::forward;
use crate::state::AppState;
use axum::{routing::any, Router};

/// Prefix the browser calls; everything after it is appended to the upstream base URL.
pub const RELAY_PREFIX: &str = "/api/smartsuite";

/// Bare prefix, trailing-slash root and every sub-path. `/*path` never matches an empty tail.
pub fn relay_routes(state: AppState) -> Router {
    Router::new()
        .route(RELAY_PREFIX, any(forward))
        .route(&format!("{RELAY_PREFIX}/"), any(forward))
        .route(&format!("{RELAY_PREFIX}/*path"), any(forward))
        .with_state(state)
}
