//! Upstream reply normalization into the relay's uniform JSON envelope.

use crate::error::{mentions_rate_limit, AppError};
use crate::response::{message_body, RelayReply};
use axum::http::StatusCode;
use serde_json::Value;

pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

/// JSON replies pass through with their status. Text replies become the fixed rate-limit
/// envelope when the status is 429 or the text says "too many requests"; otherwise they are
/// wrapped as `{"message": text}`.
pub fn normalize_reply(
    status: StatusCode,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<RelayReply, AppError> {
    if is_json_content_type(content_type) {
        let value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(body)?
        };
        return Ok(RelayReply::new(status, value));
    }

    let text = String::from_utf8_lossy(body);
    if status == StatusCode::TOO_MANY_REQUESTS || mentions_rate_limit(&text) {
        tracing::warn!(upstream_status = status.as_u16(), "upstream rate limit");
        return Ok(RelayReply::rate_limited());
    }
    Ok(RelayReply::new(status, message_body(text.into_owned())))
}

/// Decide whether an inbound body should be forwarded. Blank bodies and `{}`, `[]` or `null`
/// are dropped; anything that is not JSON is rejected.
pub fn forwardable_body(body: &[u8]) -> Result<Option<Vec<u8>>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("request body must be JSON: {}", e)))?;
    let empty = match &value {
        Value::Null => true,
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    };
    Ok(if empty { None } else { Some(body.to_vec()) })
}
