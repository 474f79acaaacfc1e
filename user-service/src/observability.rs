//! Tracing initialization

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::Result};

/// Build the log filter: `RUST_LOG` wins, then `service.log_level`, then `info`
fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.service.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global tracing subscriber
///
/// Emits JSON lines when `service.log_format` is `json`, human-readable
/// lines otherwise. Calling this again after a subscriber is installed is a
/// no-op.
pub fn init_tracing(config: &Config) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(config));

    let installed = match config.service.log_format.as_str() {
        "json" => builder.json().try_init().is_ok(),
        _ => builder.pretty().try_init().is_ok(),
    };

    if installed {
        tracing::info!("Tracing initialized for service: {}", config.service.name);
    } else {
        tracing::debug!("Tracing subscriber already installed");
    }

    Ok(())
}
