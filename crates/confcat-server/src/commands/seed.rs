use anyhow::{Context, Result};
use chrono::Utc;

use confcat_core::config::AppConfig;
use confcat_infrastructure::DataGenerator;

pub async fn run(config: AppConfig, sessions: Option<usize>, seed: Option<u64>) -> Result<()> {
    let catalog = super::open_catalog(&config).await?;
    let sessions = sessions.unwrap_or(config.seed.session_count);
    let seed = seed.unwrap_or(config.seed.rng_seed);

    let report = DataGenerator::new(seed, Utc::now())
        .generate(catalog.memory(), sessions)
        .await?;
    if report.skipped {
        println!("Catalog {} already has sessions, nothing generated", catalog.path().display());
        return Ok(());
    }

    catalog.flush().await.context("Failed to save catalog")?;
    println!(
        "Generated {} sessions, {} speakers and {} tags into {}",
        report.sessions,
        report.speakers,
        report.tags,
        catalog.path().display()
    );
    Ok(())
}
