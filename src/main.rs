// This is the entry point of the cat caption add-on.
//
// **Architecture Overview:**
// - `core/` = Business logic (captions, cat requests, folder browsing)
// - `infra/` = Implementations of core traits (image API, Google REST APIs)
// - `addon/` = Workspace add-on adapters (event parsing, cards, HTTP routes)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Build the router
// 4. Serve it

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "addon/addon_layer.rs"]
mod addon;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use anyhow::Context;
use std::sync::Arc;

use crate::addon::cards::CardRegistry;
use crate::addon::config::AddonConfig;
use crate::addon::router::build_router;
use crate::addon::state::AppState;
use crate::infra::cataas::CataasClient;
use crate::infra::google::{GoogleConnector, ServiceAccountAuth};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = AddonConfig::from_env()?;

    // One client (and connection pool) for every outbound call
    let http = reqwest::Client::new();

    let cataas = CataasClient::new(http.clone(), &config.cataas_base_url);

    let service_account = ServiceAccountAuth::from_env(http.clone())
        .await
        .context("Failed to load the Google service account")?;
    match &service_account {
        Some(auth) => tracing::info!(
            client_email = auth.client_email(),
            "Service account loaded; used when an event carries no user token"
        ),
        None => tracing::info!("No service account configured; relying on user tokens"),
    }
    let workspace = GoogleConnector::new(http, service_account);

    let bind_addr = config.bind_addr;
    let public_url = config.public_url.clone();
    let state = AppState::new(
        config,
        Box::new(cataas),
        Arc::new(workspace),
        CardRegistry::standard(),
    );

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    tracing::info!(%bind_addr, %public_url, "Cat caption add-on listening");

    axum::serve(listener, build_router(state))
        .await
        .context("HTTP server stopped")?;

    Ok(())
}
