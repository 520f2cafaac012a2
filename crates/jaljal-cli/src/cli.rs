use clap::{Parser, Subcommand, ValueEnum};
use jaljal_client::DataSource;
use jaljal_config::BASE_URL_ENV;

#[derive(Parser)]
#[command(name = "jaljal")]
#[command(about = "Find video combinations that fill a time slot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search once and print the combinations
    Search {
        /// Target duration in minutes (e.g. 30 or 12.5)
        duration: String,

        /// Number of combinations to request (1-10, default from config)
        #[arg(long)]
        attempts: Option<u32>,

        /// Where the service should look for videos
        #[arg(long)]
        source: Option<DataSource>,

        /// Service base URL (default from config)
        #[arg(long, env = BASE_URL_ENV)]
        base_url: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Launch the interactive search UI
    Ui {
        /// Service base URL (default from config)
        #[arg(long, env = BASE_URL_ENV)]
        base_url: Option<String>,
    },

    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
