use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gapfill::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gapfill=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.model.resolve()?;

    match cli.command {
        Commands::Run => {
            gapfill::cli::run(config).await?;
        }
        Commands::Predict { sentence, json } => {
            gapfill::cli::predict(config, sentence, json).await?;
        }
        Commands::Serve { port, host } => {
            gapfill::cli::serve(config, port, host).await?;
        }
        Commands::Pull { repo, output } => {
            gapfill::cli::pull(config, repo, output).await?;
        }
        Commands::Info => {
            gapfill::cli::info(config).await?;
        }
    }

    Ok(())
}
