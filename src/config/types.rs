//! Relay configuration: the fixed upstream identity plus listener settings.

use std::fmt;
use std::net::SocketAddr;

pub const DEFAULT_UPSTREAM_URL: &str = "https://app.smartsuite.com/api/v1";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Upstream identity injected into every relayed request. Loaded once at startup and never
/// handed to browser code.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialConfig {
    pub token: String,
    pub account_id: String,
    /// Stored without a trailing slash so sub-paths can be appended verbatim.
    pub upstream_base_url: String,
}

impl CredentialConfig {
    pub fn new(
        token: impl Into<String>,
        account_id: impl Into<String>,
        upstream_base_url: impl Into<String>,
    ) -> Self {
        let base: String = upstream_base_url.into();
        CredentialConfig {
            token: token.into(),
            account_id: account_id.into(),
            upstream_base_url: base.trim_end_matches('/').to_string(),
        }
    }

    /// Value of the `Authorization` header sent upstream.
    pub fn authorization(&self) -> String {
        format!("Token {}", self.token)
    }

    /// Upstream URL for a relay sub-path, e.g. `/applications/` -> `{base}/applications/`.
    pub fn upstream_url(&self, sub_path: &str) -> String {
        if sub_path.starts_with('/') {
            format!("{}{}", self.upstream_base_url, sub_path)
        } else {
            format!("{}/{}", self.upstream_base_url, sub_path)
        }
    }
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("token", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("upstream_base_url", &self.upstream_base_url)
            .finish()
    }
}

/// [`DEFAULT_BIND_ADDR`] parsed; falls back to an ephemeral loopback port if the constant is malformed.
pub fn default_bind_addr() -> SocketAddr {
    DEFAULT_BIND_ADDR
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 0)))
}

#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub credentials: CredentialConfig,
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
}

impl RelayConfig {
    /// Config with default listener settings for the given credentials.
    pub fn new(credentials: CredentialConfig) -> Self {
        RelayConfig {
            credentials,
            bind_addr: default_bind_addr(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
