//! Structured logging setup.
//!
//! Installs a global `tracing-subscriber` fmt subscriber from a
//! [`LoggingConfig`]. `RUST_LOG` takes precedence over the configured level.

use crate::config::LoggingConfig;
use crate::error::{ProtocolError, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Returns `Ok(false)` if a subscriber was already installed, leaving it in
/// place.
pub fn init_logging(config: &LoggingConfig) -> Result<bool> {
    if let Some(err) = config.validate().into_iter().next() {
        return Err(ProtocolError::ConfigError(err));
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str().to_ascii_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json_format {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    }
    Ok(installed)
}
