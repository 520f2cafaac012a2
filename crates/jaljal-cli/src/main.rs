mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use jaljal_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // The UI owns the terminal, so keep log noise down there
    let default_filter = match cli.command {
        cli::Commands::Ui { .. } => "warn",
        _ => "info",
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        cli::Commands::Search {
            duration,
            attempts,
            source,
            base_url,
            format,
        } => {
            let mut config = Config::load()?;
            commands::override_api(&mut config, base_url, source)?;
            commands::search::handle(&config, &duration, attempts, format).await
        }
        cli::Commands::Ui { base_url } => {
            let mut config = Config::load()?;
            commands::override_api(&mut config, base_url, None)?;
            commands::ui::handle(&config).await
        }
        cli::Commands::Config(cmd) => commands::config::handle(cmd),
    }
}
