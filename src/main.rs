use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use revex::cli::{commands, Cli, Commands};
use revex::config::EngineConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            url,
            store,
            retries,
            headed,
        } => {
            let mut config = match &cli.config {
                Some(path) => EngineConfig::load_from(path)?,
                None => EngineConfig::load()?,
            };
            if headed {
                config.headless = false;
            }
            commands::extract(config, &url, store.as_deref(), retries).await;
        }
        Commands::Classify { url } => {
            commands::classify(&url);
        }
    }

    Ok(())
}
