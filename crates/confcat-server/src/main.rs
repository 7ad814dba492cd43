use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "confcat")]
#[command(about = "Saved category filters over a conference session catalog", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API until Ctrl-C
    Serve {
        /// Address to bind, overriding `server.bind_addr`
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run one category query and print the JSON page
    Query {
        category_id: i64,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Defaults to `paging.default_page_size`
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long, default_value = "startDate")]
        sort_by: String,
        #[arg(long)]
        descending: bool,
    },
    /// Generate test data into the catalog file
    Seed {
        /// Defaults to `seed.session_count`
        #[arg(long)]
        sessions: Option<usize>,
        /// Defaults to `seed.rng_seed`
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config).await?;

    match cli.command {
        Commands::Serve { bind } => commands::serve::run(config, bind).await?,
        Commands::Query {
            category_id,
            page,
            page_size,
            sort_by,
            descending,
        } => {
            commands::query::run(config, category_id, page, page_size, &sort_by, descending).await?
        }
        Commands::Seed { sessions, seed } => commands::seed::run(config, sessions, seed).await?,
    }

    Ok(())
}
