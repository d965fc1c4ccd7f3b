//! Typed errors: relay-side failures with HTTP mapping, and the client-side `ApiError`.

use crate::response::{error_body, RelayReply};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVariable(&'static str),
    #[error("invalid value for {key}: '{value}'")]
    InvalidVariable { key: &'static str, value: String },
    #[error("config load: {0}")]
    Load(String),
    #[error("validation: {0}")]
    Validation(String),
}

/// Failures while relaying one request. Every variant renders as a JSON envelope.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    MalformedJson(#[from] serde_json::Error),
}

/// Case-insensitive "too many requests" scan used on upstream text and on failure messages.
pub fn mentions_rate_limit(text: &str) -> bool {
    text.to_lowercase().contains("too many requests")
}

/// Envelope for a failure that ended the forwarding attempt: the fixed rate-limit reply when
/// the message mentions it, otherwise a 500.
pub fn failure_reply(message: &str) -> RelayReply {
    if mentions_rate_limit(message) {
        return RelayReply::rate_limited();
    }
    let message = if message.trim().is_empty() {
        "Internal server error".to_string()
    } else {
        message.to_string()
    };
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    RelayReply::new(status, error_body(status, message))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(_) => {
                let status = StatusCode::BAD_REQUEST;
                (status, Json(error_body(status, self.to_string()))).into_response()
            }
            other => failure_reply(&other.to_string()).into_response(),
        }
    }
}

/// What accompanied an `ApiError`: the upstream body for HTTP failures, or the transport
/// failure text when no response arrived.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorDetails {
    Upstream(Value),
    Transport(String),
}

/// Structured failure of a resource client call. `status` is 0 when no HTTP response was
/// received.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: u16,
    pub details: ErrorDetails,
}

impl ApiError {
    pub const NETWORK_MESSAGE: &'static str = "Network error or unable to connect to SmartSuite API";

    /// Translate a non-2xx reply. The body is parsed best-effort; unparseable bodies become `{}`.
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        let details: Value = serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Default::default()));
        let message = match status {
            401 => "Invalid API token or unauthorized access".to_string(),
            404 => "Resource not found".to_string(),
            422 => "Validation error. Please check your input data.".to_string(),
            429 => "Rate limit exceeded. SmartSuite API has temporarily blocked your requests. Please wait 5-10 minutes before trying again.".to_string(),
            500 => "SmartSuite server error. Please try again in a few minutes.".to_string(),
            _ => details
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("API Error: {}", status)),
        };
        ApiError {
            message,
            status,
            details: ErrorDetails::Upstream(details),
        }
    }

    /// A failure before any HTTP response existed (connect error, undecodable body).
    pub(crate) fn network(cause: impl fmt::Display) -> Self {
        ApiError {
            message: Self::NETWORK_MESSAGE.to_string(),
            status: 0,
            details: ErrorDetails::Transport(cause.to_string()),
        }
    }

    pub fn is_network(&self) -> bool {
        self.status == 0
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    pub fn upstream_body(&self) -> Option<&Value> {
        match &self.details {
            ErrorDetails::Upstream(v) => Some(v),
            ErrorDetails::Transport(_) => None,
        }
    }

    /// Per-field entries of the upstream body as `key: text` lines (`message`/`status` skipped,
    /// list values joined with ", ").
    pub fn field_errors(&self) -> Vec<String> {
        let Some(Value::Object(map)) = self.upstream_body() else {
            return Vec::new();
        };
        map.iter()
            .filter(|(k, _)| k.as_str() != "message" && k.as_str() != "status")
            .map(|(k, v)| {
                let text = match v {
                    Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
                    other => value_text(other),
                };
                format!("{}: {}", k, text)
            })
            .collect()
    }
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
