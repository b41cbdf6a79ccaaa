//! stderr tracing setup driven by `[general]`.
//!
//! stdout is reserved for the rendered command output, so every layer
//! writes to stderr.

use anyhow::{Context, Result, bail};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use depcheck_sonar_core::config::GeneralConfig;

/// Install the global subscriber. A set `RUST_LOG` wins over `log_level`.
///
/// Fails on an unknown `log_format` or when a subscriber is already installed.
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.log_format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        "pretty" => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        other => bail!("log_format '{other}' is not supported (use json or pretty)"),
    };

    installed.with_context(|| format!("installing {} log subscriber", config.log_format))
}
