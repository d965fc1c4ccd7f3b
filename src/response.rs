//! Relay response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

pub const RATE_LIMIT_MESSAGE: &str =
    "Rate limit exceeded. Please wait a few minutes before making more requests.";

/// A normalized upstream reply: the status to answer with and the JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct RelayReply {
    pub status: StatusCode,
    pub body: Value,
}

impl RelayReply {
    pub fn new(status: StatusCode, body: Value) -> Self {
        RelayReply { status, body }
    }

    pub fn rate_limited() -> Self {
        RelayReply {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: error_body(StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE.to_string()),
        }
    }
}

impl IntoResponse for RelayReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// `{"message": text}`, used to wrap non-JSON upstream bodies.
pub fn message_body(text: impl Into<String>) -> Value {
    serde_json::json!({ "message": text.into() })
}

/// `{"message": ..., "status": ...}`, used for failures the relay itself reports.
pub fn error_body(status: StatusCode, message: String) -> Value {
    serde_json::json!({
        "message": message,
        "status": status.as_u16()
    })
}
