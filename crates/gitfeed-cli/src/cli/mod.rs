//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use gitfeed_core::config;

mod commands;

#[derive(Parser)]
#[command(name = "gitfeed")]
#[command(version = "0.1")]
#[command(about = "Watches a GitHub-webhook event feed and renders the latest events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Poll the feed continuously and re-render the list each cycle
    Watch {
        /// Override the poll interval from config
        #[arg(long, value_name = "SECS")]
        interval_secs: Option<u64>,

        /// Override the feed base URL (also: GITFEED_BASE_URL)
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Override the maximum number of events shown
        #[arg(long, value_name = "N")]
        max_events: Option<usize>,
    },

    /// Fetch the event list once and print it
    Fetch {
        /// Override the feed base URL (also: GITFEED_BASE_URL)
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Stderr logging, filtered by GITFEED_LOG (defaults to warnings only).
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("GITFEED_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Watch {
            interval_secs,
            base_url,
            max_events,
        } => {
            let mut config = config::Config::load().context("load config")?;
            if let Some(secs) = interval_secs {
                config.poll_interval_secs = secs;
            }
            if let Some(url) = base_url {
                config.base_url = Some(url);
            }
            if let Some(n) = max_events {
                config.max_events = n;
            }
            commands::watch::run(&config).await
        }
        Commands::Fetch { base_url } => {
            let mut config = config::Config::load().context("load config")?;
            if let Some(url) = base_url {
                config.base_url = Some(url);
            }
            commands::fetch::run(&config).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
