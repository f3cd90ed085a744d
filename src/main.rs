use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gazette_jobs::config::Config;
use gazette_jobs::crawler::GazetteCrawler;
use gazette_jobs::server::{self, AppState};

#[derive(Parser)]
#[command(
    name = "gazette-jobs",
    version,
    about = "Find and summarize job vacancies posted on gazette.lk",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Search job postings and print the result as JSON
    Search {
        /// Search query
        query: String,
    },

    /// List current job postings and print them as JSON
    Jobs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            tracing::info!(address = %config.bind_address(), "Starting serve command");

            let crawler = GazetteCrawler::from_config(&config)?;
            server::serve(AppState::new(crawler), &config.server, server::ctrl_c_signal()).await?;
        }

        Commands::Search { query } => {
            tracing::info!(query = %query, "Starting search command");

            let crawler = GazetteCrawler::from_config(&config)?;
            let response = crawler.search_jobs(&query).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Jobs => {
            tracing::info!("Starting jobs command");

            let crawler = GazetteCrawler::from_config(&config)?;
            let response = crawler.all_jobs().await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Install the global subscriber; `RUST_LOG` takes precedence when set
fn setup_tracing(format: &str, level: &str, verbose: bool) {
    let default_directive = if verbose {
        "gazette_jobs=debug,tower_http=debug,info".to_string()
    } else {
        format!("gazette_jobs={level},warn")
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    // Logs go to stderr so `search`/`jobs` output stays valid JSON
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
