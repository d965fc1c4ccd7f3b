//! Config validation: credential presence and upstream URL shape.

use crate::config::RelayConfig;
use crate::error::ConfigError;

pub fn validate(config: &RelayConfig) -> Result<(), ConfigError> {
    let creds = &config.credentials;
    if creds.token.trim().is_empty() {
        return Err(ConfigError::Validation("upstream token must not be empty".into()));
    }
    if creds.account_id.trim().is_empty() {
        return Err(ConfigError::Validation("account id must not be empty".into()));
    }
    let url = creds.upstream_base_url.as_str();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::Validation(format!(
            "upstream base url must be http(s): {}",
            url
        )));
    }
    if config.max_body_bytes == 0 {
        return Err(ConfigError::Validation("max body bytes must be positive".into()));
    }
    Ok(())
}
