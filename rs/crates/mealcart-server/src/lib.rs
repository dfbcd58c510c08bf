//! mealcart-server — serves the storefront page and applies customer actions.

pub mod config;
pub mod error;
pub mod server;
pub mod sessions;
pub mod storefront;

use std::sync::Arc;

use mealcart_catalog::{CatalogSource, FixtureCatalog, MealDbClient};
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tracing::info;

use config::{CatalogKind, Config};
use error::AppError;
use server::ServerState;
use sessions::Sessions;

/// Build the catalog the config asks for.
pub fn catalog(config: &Config) -> Result<Arc<dyn CatalogSource>, AppError> {
    let catalog: Arc<dyn CatalogSource> = match config.catalog {
        CatalogKind::MealDb => {
            info!(
                base_url = %config.mealdb_base_url,
                timeout = ?config.http_timeout,
                "using TheMealDB"
            );
            Arc::new(MealDbClient::with_timeout(&config.mealdb_base_url, config.http_timeout)?)
        }
        CatalogKind::Fixture => {
            info!("using built-in fixture catalog");
            Arc::new(FixtureCatalog::sample())
        }
    };
    Ok(catalog)
}

pub fn state(config: &Config, catalog: Arc<dyn CatalogSource>) -> Arc<ServerState> {
    Arc::new(ServerState {
        sessions: Sessions::new(
            catalog,
            &config.default_category,
            config.categories.clone(),
            config.seed,
            config.max_sessions,
        ),
    })
}

pub async fn start_server(config: Config) -> Result<(), AppError> {
    let app = server::router(state(&config, catalog(&config)?));

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!(
        "Mealcart v{} running on http://localhost:{}",
        env!("CARGO_PKG_VERSION"),
        config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
