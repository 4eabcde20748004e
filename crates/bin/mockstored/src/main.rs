//! # mockstored: mockstore daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Load both JSON datastores (catalog and generic data) into their mirrors
//! - Construct application services, injecting the file stores via the port trait
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use mockstore_adapter_http_axum::router::{self, Options};
use mockstore_adapter_http_axum::state::AppState;
use mockstore_adapter_storage_json_file::Config as StorageConfig;
use mockstore_app::services::catalog_service::CatalogService;
use mockstore_app::services::data_service::DataService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Storage
    let catalog_store = StorageConfig {
        path: config.storage.catalog_path.clone(),
    }
    .build();
    let data_store = StorageConfig {
        path: config.storage.data_path.clone(),
    }
    .build();

    // Services
    let catalog_service = CatalogService::open(catalog_store).await?;
    let data_service = DataService::open(data_store).await?;

    // HTTP
    let state = AppState::new(catalog_service, data_service);
    let app = router::build(
        state,
        &Options {
            cors: config.server.cors,
        },
    );

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        %bind_addr,
        catalog = %config.storage.catalog_path.display(),
        data = %config.storage.data_path.display(),
        "mockstored listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("mockstored stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
