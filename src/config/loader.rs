//! Load relay config from the process environment (after `.env`, when present).

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::net::SocketAddr;

pub const ENV_API_TOKEN: &str = "SMARTSUITE_API_TOKEN";
pub const ENV_ACCOUNT_ID: &str = "SMARTSUITE_ACCOUNT_ID";
pub const ENV_API_URL: &str = "SMARTSUITE_API_URL";
pub const ENV_BIND_ADDR: &str = "RELAY_BIND_ADDR";
pub const ENV_MAX_BODY_BYTES: &str = "RELAY_MAX_BODY_BYTES";

/// Read `.env` if present, then build and validate the config from environment variables.
pub fn load_from_env() -> Result<RelayConfig, ConfigError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(ConfigError::Load(e.to_string()));
        }
    }
    load_with(|key| std::env::var(key).ok())
}

/// Build config from an arbitrary variable lookup. Blank values count as unset.
pub fn load_with<F>(lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let token = var(ENV_API_TOKEN).ok_or(ConfigError::MissingVariable(ENV_API_TOKEN))?;
    let account_id = var(ENV_ACCOUNT_ID).ok_or(ConfigError::MissingVariable(ENV_ACCOUNT_ID))?;
    let base_url = var(ENV_API_URL).unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());

    let bind_raw = var(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
    let bind_addr: SocketAddr = bind_raw.parse().map_err(|_| ConfigError::InvalidVariable {
        key: ENV_BIND_ADDR,
        value: bind_raw.clone(),
    })?;

    let max_body_bytes = match var(ENV_MAX_BODY_BYTES) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVariable {
            key: ENV_MAX_BODY_BYTES,
            value: raw.clone(),
        })?,
        None => DEFAULT_MAX_BODY_BYTES,
    };

    let config = RelayConfig {
        credentials: CredentialConfig::new(token, account_id, base_url),
        bind_addr,
        max_body_bytes,
    };
    validate(&config)?;
    Ok(config)
}
