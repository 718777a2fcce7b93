//! Logging subscriber initialisation.

use anyhow::Result;
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber. Logs go to stderr.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = build_env_filter(config, verbose);
    match config.format {
        LogFormat::Compact => init_with_layer(
            filter,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(std::io::stderr),
        ),
        LogFormat::Json => init_with_layer(
            filter,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(std::io::stderr),
        ),
    }
}

fn build_env_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level, verbose)))
}

/// Filter used when `RUST_LOG` is unset. `--verbose` raises our own crates
/// to `debug` and leaves the HTTP stack quiet.
fn default_directive(level: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { level };
    format!("{},hyper=warn,reqwest=warn,rustls=warn", level)
}

fn init_with_layer<L>(filter: EnvFilter, fmt_layer: L) -> Result<()>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(
            default_directive("info", false),
            "info,hyper=warn,reqwest=warn,rustls=warn"
        );
        assert!(default_directive("warn", true).starts_with("debug,"));
    }

    #[test]
    fn test_directive_parses() {
        assert!(EnvFilter::try_new(default_directive("shelf_client=trace", false)).is_ok());
    }
}
