pub mod api;
pub mod config;
pub mod model;
pub mod seed;
pub mod store;
pub mod views;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export all model types
pub use model::*;

// Export store types
pub use store::{MemoryStore, PostgresStore, Store, StoreError, StoreResult};

use std::sync::Arc;

use axum::serve;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::AppConfig;

/// Bind the listener, then provision the schema (and optionally seed) in the
/// background while already serving, until Ctrl-C.
///
/// A failed initialization is logged rather than returned: the server keeps
/// running and each request reports the store error on its own.
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let store = Arc::new(PostgresStore::new(
        config.connect_options()?,
        config.max_connections(),
        config.acquire_timeout(),
    ));

    let app = routes::create_router(&config.server.static_dir).with_state(store.clone());

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Server running on http://{}", bind_address);

    let setup = spawn_initialization(store.clone(), config.load_seed_data);

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    setup.abort();
    store.close().await;
    log::info!("Server stopped");

    Ok(())
}

/// Run `initialize` and the optional seed load on a separate task. Failures
/// are logged; the returned report is `None` when nothing was seeded.
pub fn spawn_initialization<S: Store + 'static>(
    store: Arc<S>,
    load_seed_data: bool,
) -> JoinHandle<Option<seed::SeedReport>> {
    tokio::spawn(async move {
        if let Err(err) = store.initialize().await {
            log::error!("Failed to synchronize database: {err}");
            return None;
        }
        if !load_seed_data {
            return None;
        }

        log::info!("Loading seed data...");
        let loaded = match seed::bundled_catalog() {
            Ok(catalog) => seed::load_seed_data(&*store, &catalog).await,
            Err(err) => Err(err),
        };
        match loaded {
            Ok(report) => Some(report),
            Err(err) => {
                log::error!("Failed to load seed data: {err:#}");
                None
            }
        }
    })
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::traits::SetStore;

    #[tokio::test]
    async fn background_initialization_seeds_when_enabled() {
        let store = Arc::new(MemoryStore::new());

        let report = spawn_initialization(store.clone(), true).await.unwrap();
        let report = report.expect("seed data should load");
        assert!(report.sets_inserted > 0);
        assert_eq!(store.get_all_sets().await.unwrap().len(), report.sets_inserted);
    }

    #[tokio::test]
    async fn background_initialization_skips_seed_when_disabled() {
        let store = Arc::new(MemoryStore::new());

        assert!(spawn_initialization(store.clone(), false).await.unwrap().is_none());
        assert!(store.get_all_sets().await.unwrap_err().is_not_found());
    }
}
