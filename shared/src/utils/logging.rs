//! Tracing subscriber initialisation

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Install a global `tracing` subscriber built from the logging configuration
///
/// `RUST_LOG` takes precedence over `config.level`. Returns `false` if a
/// global subscriber was already installed, which makes repeated calls from
/// tests harmless.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    if result.is_err() {
        return false;
    }

    tracing::debug!(
        level = %config.level,
        format = ?config.format,
        "Tracing subscriber installed"
    );
    true
}
