//! Route assembly for the relay process.

pub mod common;
pub mod relay;

pub use common::common_routes;
pub use relay::{relay_routes, RELAY_PREFIX};

use crate::state::AppState;
use axum::Router;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full relay application: common routes, the relay under [`RELAY_PREFIX`], CORS, body limit
/// and request tracing.
pub fn relay_app(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    Router::new()
        .merge(common_routes())
        .merge(relay_routes(state))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
