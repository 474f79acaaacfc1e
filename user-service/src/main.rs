use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use user_service::prelude::*;

/// user-service - In-memory user records over HTTP
#[derive(Parser)]
#[command(name = "user-service")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations
    #[arg(short, long, env = "USER_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind, overriding configuration
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    };

    if let Some(host) = cli.host {
        config.service.host = host;
    }
    if let Some(port) = cli.port {
        config.service.port = port;
    }
    config.validate().context("invalid command line overrides")?;

    init_tracing(&config)?;

    let router = build_router(AppState::new(config.clone()));

    Server::new(config).serve(router).await?;

    Ok(())
}
