//! Fixture mock server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ request id ─▶ cors ─▶ request log ─▶ body parse ─▶ body log
//!                                  │                                       │
//!                         OPTIONS: 200                                     ▼
//!                                                               ┌──────────────────┐
//!                                                               │ control params   │
//!                                                               │ (_return/_delay) │
//!                                                               └────────┬─────────┘
//!                                                                        ▼
//!                                  ┌──────────┐    ┌──────────────────────────────┐
//!                                  │ fixtures │◀───│ composer (forced | fixture | │
//!                                  │  <dir>/  │    │    404 | 500 | default)      │
//!                                  └──────────┘    └──────────────┬───────────────┘
//!                                                                 ▼
//!   Client Response                                        delivery (delay)
//!   ◀─────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use fixture_mock_server::config::{load_config, validate_config, ConfigError, MockServerConfig};
use fixture_mock_server::lifecycle::{wait_for_signal, Shutdown};
use fixture_mock_server::observability::{init_logging, metrics};
use fixture_mock_server::HttpServer;

#[derive(Parser, Debug)]
#[command(
    name = "fixture-mock-server",
    about = "HTTP mock server answering GET requests from JSON fixture files",
    version
)]
struct Args {
    /// Port to listen on (default 3000)
    port: Option<u16>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the JSON fixtures
    #[arg(short, long, value_name = "DIR")]
    mocks_dir: Option<PathBuf>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long)]
    log_level: Option<String>,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,
}

impl Args {
    fn into_config(self) -> Result<(MockServerConfig, bool), ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => MockServerConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(dir) = self.mocks_dir {
            config.fixtures.dir = dir;
        }
        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok((config, self.validate))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, validate_only) = Args::parse().into_config()?;

    if validate_only {
        println!("Configuration is valid");
        return Ok(());
    }

    init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        fixtures_dir = %config.fixtures.dir.display(),
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    if !config.fixtures.dir.is_dir() {
        tracing::warn!(
            fixtures_dir = %config.fixtures.dir.display(),
            "Fixture directory does not exist; every GET will return 404"
        );
    }

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("Server running on http://localhost:{}", local_addr.port());

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
