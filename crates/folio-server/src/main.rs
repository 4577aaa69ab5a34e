//! Portfolio gateway binary
//!
//! Loads configuration from an optional YAML file plus the environment and
//! serves either the frontend or the dashboard surface until interrupted.

use anyhow::Result;
use clap::Parser;
use folio_core::config::ConfigLoader;
use folio_core::Surface;
use folio_server::{shutdown_signal, AppState, FolioServer, ServerConfig};
use log::LevelFilter;
use std::path::Path;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Folio Server - Portfolio API gateway")]
struct Cli {
    #[clap(long, short, default_value = "folio.yaml", help = "Configuration file; missing files fall back to defaults and environment")]
    config: String,

    #[clap(long, help = "Overrides server.bind_addr")]
    bind_addr: Option<String>,

    #[clap(long, help = "Surface to serve: frontend or dashboard")]
    surface: Option<Surface>,

    #[clap(long, short, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    let mut config = if Path::new(&cli.config).exists() {
        log::info!("Loading configuration from file: {}", cli.config);
        ConfigLoader::from_file(&cli.config).await?
    } else {
        log::info!(
            "No configuration file at {}, using defaults and environment",
            cli.config
        );
        ConfigLoader::from_env()?
    };

    if let Some(bind_addr) = cli.bind_addr {
        config.server.bind_addr = bind_addr;
    }
    if let Some(surface) = cli.surface {
        config.server.surface = surface;
    }
    config.validate()?;

    let state = AppState::from_config(&config)?;
    let server_config = ServerConfig::from_section(&config.server)?;

    log::info!(
        "Starting folio {} surface on {}...",
        server_config.surface,
        server_config.bind_addr
    );

    let server = FolioServer::with_config(state, server_config);
    if let Err(e) = server.serve_with_shutdown(shutdown_signal()).await {
        log::error!("Server failed: {}", e);
        return Err(e.into());
    }

    log::info!("Folio server shut down gracefully.");
    Ok(())
}
