mod discover;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "leadscout-cli")]
#[command(about = "Discover and rank sales leads from public posts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search a channel for posts with buying intent and rank them
    Discover {
        /// Free-text description of the need (e.g. "CRM software")
        #[arg(long)]
        query: String,
        /// Channel name: linkedin, twitter, reddit, quora, or anything else for the open web
        #[arg(long, default_value = "linkedin")]
        channel: String,
        /// Caller's numeric key for the channel, echoed on every result
        #[arg(long, default_value_t = 0)]
        channel_key: i64,
        /// Print synthetic candidates when live discovery finds nothing
        #[arg(long)]
        mock_fallback: bool,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print synthetic candidates without calling any external service
    Mock {
        #[arg(long, default_value = "Tech")]
        query: String,
        #[arg(long, default_value = "linkedin")]
        channel: String,
        #[arg(long, default_value_t = 0)]
        channel_key: i64,
        /// Seed for the link suffixes; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = leadscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Discover {
            query,
            channel,
            channel_key,
            mock_fallback,
            json,
        } => {
            let request = leadscout_core::SearchRequest::new(query, channel, channel_key);
            discover::run_discover(&config, &request, mock_fallback, json).await?;
        }
        Commands::Mock {
            query,
            channel,
            channel_key,
            seed,
            json,
        } => {
            let request = leadscout_core::SearchRequest::new(query, channel, channel_key);
            discover::run_mock(&request, seed, json)?;
        }
    }

    Ok(())
}
