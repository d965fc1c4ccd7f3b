//! Relay process: loads the upstream identity from the environment and serves the relay.
//!
//! Run from repo root: `cargo run -p relay-server`

use smartsuite_relay::{load_from_env, relay_app, AppState, RELAY_PREFIX};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads `.env` too, so RUST_LOG from it reaches the filter below.
    let config = load_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("smartsuite_relay=info,tower_http=info")),
        )
        .init();

    let bind_addr = config.bind_addr;
    tracing::info!(
        upstream = %config.credentials.upstream_base_url,
        account_id = %config.credentials.account_id,
        "relay configured"
    );

    let app = relay_app(AppState::new(config));
    let listener = TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!("relay listening on http://{}", addr);
    tracing::info!("forwarding {}/* to the SmartSuite API", RELAY_PREFIX);
    axum::serve(listener, app).await?;
    Ok(())
}
