//! car-catalog - loads brand inventories and serves them over HTTP.
//!
//! Exits non-zero if the catalog cannot be loaded.

use anyhow::{Context, Result};
use car_catalog::{catalog, http, ServerConfig};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = match catalog::load_dir(&config.data_dir, &config.file_prefix) {
        Ok(store) => store,
        Err(err) => {
            error!(error = %err, dir = %config.data_dir.display(), "could not load car data, shutting down");
            std::process::exit(1);
        }
    };

    http::serve(store, config.addr())
        .await
        .with_context(|| format!("serve on {}", config.addr()))
}
