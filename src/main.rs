//! Hermeneia - localized site server.
//!
//! Boots the message catalog and serves the site with locale-aware
//! routing on top of the library crate.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use hermeneia::catalog::MessageCatalog;
use hermeneia::config::Config;
use hermeneia::web;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Initialize logging with sensible defaults
    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hermeneia=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Hermeneia site server...");

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded successfully");

    // Load the embedded message catalog
    let catalog = Arc::new(MessageCatalog::builtin());
    info!("Message catalog loaded ({} locales)", catalog.locales().count());

    // Build the router and serve until shutdown
    let router = web::build_router(catalog);
    web::serve(&config, router).await?;

    Ok(())
}
