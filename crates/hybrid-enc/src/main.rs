//! `hybrid-enc` — service binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise telemetry (structured JSON logs).
//! 3. Parse key material into the immutable [`KeyRing`].
//! 4. Build the served OpenAPI document.
//! 5. Build the Axum router and start the HTTP server.

mod config;
mod crypto;
mod keys;
mod server;
mod telemetry;

use anyhow::Result;
use tracing::info;

use config::Config;
use keys::KeyRing;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        "hybrid-enc starting"
    );

    // -----------------------------------------------------------------------
    // 3. Key ring
    // -----------------------------------------------------------------------
    let keys = KeyRing::from_config(&cfg);
    info!(
        encrypt_ready = keys.encrypt_ready(),
        decrypt_ready = keys.decrypt_ready(),
        "key material loaded"
    );

    // -----------------------------------------------------------------------
    // 4. OpenAPI document
    // -----------------------------------------------------------------------
    let api_docs = server::docs::api_document()?;

    // -----------------------------------------------------------------------
    // 5. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(keys, api_docs);
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
