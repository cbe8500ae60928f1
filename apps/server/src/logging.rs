//! Logging initialization for server binaries
//!
//! Sets up a `tracing` subscriber from [`LoggingConfig`]: JSON or
//! human-readable output, with `RUST_LOG` taking precedence over the
//! configured default filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {e}"))?;
    } else {
        registry
            .with(fmt::layer())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {e}"))?;
    }

    Ok(())
}
