use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playtime::aggregate::PlaylistAggregator;
use playtime::api::state::AppState;
use playtime::api::{build_router, INVALID_LINK_MESSAGE};
use playtime::config::AppConfig;
use playtime::fetch::{PlaylistSource, YouTubeClient};

#[derive(Parser)]
#[command(name = "playtime")]
#[command(about = "Total up the running time of a YouTube playlist")]
#[command(version)]
struct Cli {
    /// Path to configuration file (optional)
    #[arg(long, default_value = "./playtime.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Analyze one playlist and print the totals
    Analyze {
        /// Playlist link or ID
        link: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = AppConfig::load(Some(&cli.config)).context("Failed to load configuration")?;

    // Initialize tracing
    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting playtime v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Configuration: {:?}", config);

    let client = YouTubeClient::new(&config.youtube).context("Failed to create API client")?;
    tracing::info!(
        "Using {} source (API {}, {} items per page)",
        client.name(),
        config.youtube.api_version,
        config.youtube.max_results
    );
    let aggregator = PlaylistAggregator::new(Arc::new(client), config.youtube.max_results);
    let state = AppState::new(aggregator);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let app = build_router(state);
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Commands::Analyze { link } => match state.analyze(&link).await {
            Ok(report) => {
                for line in &report.display_text {
                    println!("{}", line);
                }
            }
            Err(e) => {
                tracing::error!("{}", e);
                for line in INVALID_LINK_MESSAGE {
                    eprintln!("{}", line);
                }
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
