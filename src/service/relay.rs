//! Forward one inbound request to the upstream API with the configured credentials.

use crate::error::AppError;
use crate::response::RelayReply;
use crate::service::normalize::{forwardable_body, normalize_reply};
use crate::state::AppState;
use axum::http::{header, Method};

pub const ACCOUNT_ID_HEADER: &str = "Account-Id";

pub struct RelayService;

impl RelayService {
    /// One inbound request maps to exactly one upstream call; nothing is retried.
    pub async fn forward(
        state: &AppState,
        method: Method,
        sub_path: &str,
        query: Option<&str>,
        body: &[u8],
    ) -> Result<RelayReply, AppError> {
        let creds = &state.config.credentials;
        let mut url = creds.upstream_url(sub_path);
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(q);
        }
        let payload = forwardable_body(body)?;

        tracing::info!(method = %method, url = %url, "relay request");

        let mut request = state
            .http
            .request(method, &url)
            .header(header::AUTHORIZATION, creds.authorization())
            .header(ACCOUNT_ID_HEADER, creds.account_id.as_str())
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(bytes) = payload {
            request = request.body(bytes);
        }

        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        let reply = normalize_reply(status, content_type.as_deref(), &bytes)?;
        tracing::info!(status = reply.status.as_u16(), upstream_status = status.as_u16(), "relay response");
        Ok(reply)
    }
}
