//! Web module - the site's HTTP surface.
//!
//! - `redirect` - edge-level locale redirection, in front of every route
//! - `client` - the request-backed client environment
//! - `pages` - localized page handlers, the locale switcher, health

pub mod client;
pub mod pages;
pub mod redirect;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::catalog::MessageCatalog;
use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The site's message catalog, read-only after startup.
    pub catalog: Arc<MessageCatalog>,
}

/// Build the site router: pages in both URL forms, the locale switcher,
/// the health endpoint, and the edge redirector wrapped around all of it.
pub fn build_router(catalog: Arc<MessageCatalog>) -> Router {
    let state = AppState { catalog };

    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/journal", get(pages::journal))
        .route("/contact", get(pages::contact))
        .route("/:locale", get(pages::localized_home))
        .route("/:locale/about", get(pages::localized_about))
        .route("/:locale/journal", get(pages::localized_journal))
        .route("/:locale/contact", get(pages::localized_contact))
        .route("/locale/:tag", get(pages::switch_locale))
        .route("/api/health", get(pages::health))
        .fallback(pages::not_found)
        .layer(middleware::from_fn(redirect::locale_redirect))
        .with_state(state)
}

/// Serve the site until ctrl-c.
pub async fn serve(config: &Config, router: Router) -> anyhow::Result<()> {
    let address = SocketAddr::from((config.host, config.port));
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("📡 Listening on: {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Without the handler there is no clean way to stop the server.
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("Shutdown signal received");
}
