//! Logging initialization and configuration.
//!
//! Uses the `tracing` ecosystem for structured logging with support for
//! both human-readable and JSON output formats.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `level` - Default filter directive when `RUST_LOG` is unset.
/// * `json_format` - If true, outputs structured JSON logs; otherwise pretty-printed.
///
/// # Notes
///
/// - Log output goes to stderr (stdout is reserved for the run summary)
/// - The RUST_LOG environment variable can override the log level
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize logging from the loaded configuration plus CLI overrides.
pub fn init_from_config(
    config: &cropthumb_core::Config,
    verbose_override: bool,
    json_logs_override: bool,
) {
    let (level, json) = resolve(config, verbose_override, json_logs_override);
    init(level, json);
}

/// Work out the default level and output format.
///
/// `--verbose` only ever raises verbosity; an explicit `trace` in the
/// config is kept.
fn resolve(
    config: &cropthumb_core::Config,
    verbose_override: bool,
    json_logs_override: bool,
) -> (&str, bool) {
    let level = match config.logging.level.as_str() {
        "trace" => "trace",
        _ if verbose_override => "debug",
        other => other,
    };
    let json_format = json_logs_override || config.logging.format == "json";
    (level, json_format)
}
