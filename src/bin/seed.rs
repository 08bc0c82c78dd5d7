use anyhow::{Context, Result};
use dotenv::dotenv;
use tracing::{error, info};

use portfolio_backend::logging;
use portfolio_backend::services::db::Connection;
use portfolio_backend::services::seed::{self, SeedConfig};
use portfolio_backend::AppState;

/**
 * one-shot import of the canonical portfolio content
 * exits non-zero on any failure
 */
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init_console();

    if let Err(err) = run().await {
        error!("Seed failed: {err:#}");
        return Err(err);
    }
    Ok(())
}

async fn run() -> Result<()> {
    info!("Starting seed...");
    let config = SeedConfig::from_env()?;
    let source = seed::load_source(config.data_path.as_deref())?;

    let connection = Connection::new(config.db);
    connection
        .connect()
        .await
        .context("could not connect to MongoDB")?;

    let state = AppState::mongo(connection.clone());
    let summary = seed::seed(&state, &source).await;
    connection.shutdown().await;

    let summary = summary?;
    info!(
        projects = summary.projects,
        profiles = summary.profiles,
        "Seed complete"
    );
    Ok(())
}
