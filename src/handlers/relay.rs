//! Relay handler: forwards any method under the relay prefix.

use crate::error::AppError;
use crate::response::RelayReply;
use crate::routes::RELAY_PREFIX;
use crate::service::RelayService;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
};

/// Upstream sub-path for a request path under [`RELAY_PREFIX`]; the bare prefix maps to `/`.
pub fn sub_path(path: &str) -> &str {
    match path.strip_prefix(RELAY_PREFIX) {
        Some("") | None => "/",
        Some(rest) => rest,
    }
}

pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<RelayReply, AppError> {
    let method_label = method.clone();
    RelayService::forward(&state, method, sub_path(uri.path()), uri.query(), &body)
        .await
        .map_err(|e| {
            tracing::error!(method = %method_label, path = %uri.path(), error = %e, "relay error");
            e
        })
}
