//! Chat relay server
//!
//! Run with: cargo run --bin folio-relay
//!
//! # Configuration
//!
//! Environment variables (a `.env` file is read first):
//! - `FOLIO_RELAY_ADDR`: Address to bind (default: 0.0.0.0:5000)
//! - `FOLIO_ALLOWED_ORIGIN`: Page origin allowed by CORS (default: http://127.0.0.1:8000)
//! - `GEMINI_API_KEY`: Gemini API key; when unset the relay echoes messages
//! - `RUST_LOG`: Log filter (default: folio=info,tower_http=debug)

use folio::config::{RelayConfig, load_env};
use folio::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    // Environment is loaded before the runtime starts its worker threads.
    load_env();
    init_tracing("folio=info,tower_http=debug");

    tracing::info!("starting folio chat relay v{}", env!("CARGO_PKG_VERSION"));

    let config = RelayConfig::from_env()?;
    tokio::runtime::Runtime::new()?.block_on(folio::relay::serve(config))
}
