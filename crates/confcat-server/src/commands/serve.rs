use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;

use confcat_core::config::AppConfig;
use confcat_infrastructure::DataGenerator;
use confcat_server::{Server, ServerState};

pub async fn run(config: AppConfig, bind: Option<String>) -> Result<()> {
    let catalog = Arc::new(super::open_catalog(&config).await?);

    if config.seed.enabled {
        let report = DataGenerator::new(config.seed.rng_seed, Utc::now())
            .generate(catalog.memory(), config.seed.session_count)
            .await?;
        if !report.skipped {
            catalog.flush().await.context("Failed to save seeded catalog")?;
        }
    }

    let bind_addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());
    let state = ServerState::from_catalog(catalog, &config);
    let server = Server::start(&bind_addr, state).await?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    tracing::info!(target: "confcat::server", "Shutting down");
    server.stop().await;
    Ok(())
}
