//! Tracing subscriber setup

use crate::config::LoggingConfig;
use crate::utils::error::{AclError, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` wins over the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .map_err(|e| AclError::config(format!("Invalid RUST_LOG '{}': {}", directives, e))),
        _ => EnvFilter::try_new(&config.level)
            .map_err(|e| AclError::config(format!("Invalid log level '{}': {}", config.level, e))),
    }
}

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;

    let installed = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .try_init()
    };

    installed.map_err(|e| AclError::internal(format!("Failed to initialize logging: {}", e)))
}
