use anyhow::Result;
use dotenv::dotenv;
use tracing::{error, info};

use portfolio_backend::config::AppConfig;
use portfolio_backend::services::db::{Connection, Lifecycle};
use portfolio_backend::surfaces::{self, Surface};
use portfolio_backend::{logging, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    //Logging
    let _guard = logging::init();
    info!("Logging initialised");

    let config =
        AppConfig::from_env().inspect_err(|err| error!("Invalid configuration: {err}"))?;

    let connection = Connection::new(config.db.clone());
    // the standalone server refuses to start without a database, the embedded one dials lazily
    if config.surface == Surface::Standalone {
        connection
            .connect()
            .await
            .inspect_err(|err| error!("Failed to start server: {err}"))?;
    }

    let state = AppState::mongo(connection.clone());
    let app = surfaces::router(config.surface, state, config.cors_origin.clone());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(
        surface = %config.surface,
        "Server running on http://localhost:{}",
        config.port
    );
    info!("Health check: http://localhost:{}/api/health", config.port);

    let draining = connection.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested");
            }
            draining.mark(Lifecycle::Closing);
        })
        .await?;

    connection.shutdown().await;
    Ok(())
}
