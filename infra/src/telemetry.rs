//! Tracing subscriber setup
//!
//! One global subscriber: an `EnvFilter` (from `RUST_LOG`, falling back to
//! the configured level) over a `fmt` layer in the configured format.

use jb_shared::config::{LogFormat, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::InfrastructureError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global tracing subscriber
///
/// Fails if a subscriber is already installed or the filter does not parse.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = build_filter(config)?;

    Registry::default()
        .with(fmt_layer(config))
        .with(filter)
        .try_init()
        .map_err(|e| InfrastructureError::Telemetry(e.to_string()))?;

    tracing::debug!(level = %config.level, format = ?config.format, "Tracing initialized");
    Ok(())
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, InfrastructureError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| InfrastructureError::Telemetry(format!("invalid log filter: {}", e)))
}

fn fmt_layer(config: &LoggingConfig) -> BoxedLayer {
    let layer = fmt::layer()
        .with_target(true)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    match (config.format, config.timestamp) {
        (LogFormat::Json, true) => layer.json().boxed(),
        (LogFormat::Json, false) => layer.json().without_time().boxed(),
        (LogFormat::Pretty, true) => layer.pretty().boxed(),
        (LogFormat::Pretty, false) => layer.pretty().without_time().boxed(),
        (LogFormat::Compact, true) => layer.compact().boxed(),
        (LogFormat::Compact, false) => layer.compact().without_time().boxed(),
    }
}
