//! Subscriber setup for the parser and emitter events
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! subscriber is installed. The CLI installs one through [`init_logging`],
//! writing to stderr so the diagram on stdout is never mixed with logs.
//!
//! ```rust,no_run
//! use plantsharp::core::logging::init_logging;
//!
//! init_logging(Some("debug"), Some("compact")).unwrap();
//! ```
//!
//! # Log Levels
//!
//! - `trace`: Every visited declaration and token counts
//! - `debug`: Package openings and per-source parse summaries
//! - `info`: Start and end of a generation run (default)
//! - `warn`: Sources that failed to parse
//! - `error`: Error messages
//!
//! # Log Formats
//!
//! - `compact`: one line per event, no targets
//! - `pretty`: multi-line with source locations and span enter/exit
//! - `json`: one JSON object per event
//!
//! # Environment Variables
//!
//! - `PLANTSHARP_LOG_LEVEL`: Set log level (trace|debug|info|warn|error)
//! - `PLANTSHARP_LOG_FORMAT`: Set log format (compact|pretty|json)
//! - `RUST_LOG`: Alternative way to set log level (tracing-subscriber standard)
//!
//! # Filtering Logs
//!
//! ```bash
//! # Show only parser logs at debug level
//! RUST_LOG="plantsharp::plugins::csharp=debug" plantsharp generate src/
//!
//! # Show all logs at info level, but the emitter at trace level
//! RUST_LOG="info,plantsharp::plugins::plantuml=trace" plantsharp generate src/
//! ```

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Environment variable for the log level
pub const LOG_LEVEL_ENV: &str = "PLANTSHARP_LOG_LEVEL";

/// Environment variable for the log format
pub const LOG_FORMAT_ENV: &str = "PLANTSHARP_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Names accepted by `from_str`
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Install the global subscriber.
///
/// `level` is an `EnvFilter` directive such as `debug` or
/// `plantsharp::plugins::csharp=trace`, falling back to
/// `PLANTSHARP_LOG_LEVEL`, then `RUST_LOG`, then `info`. An unparsable
/// directive is treated as `info`. `format` falls back to
/// `PLANTSHARP_LOG_FORMAT`, then `compact`.
///
/// Fails on an unknown format or when a subscriber is already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = level
        .map(|s| s.to_string())
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    let log_format = format
        .map(|s| s.to_string())
        .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
        .unwrap_or_else(|| "compact".to_string());

    let filter = if log_level == "off" {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let format =
        LogFormat::from_str(&log_format).map_err(|e| format!("Invalid log format: {}", e))?;

    match format {
        LogFormat::Compact => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_level(true)
                        .with_file(false)
                        .with_line_number(false)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .json(),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// [`init_logging`] driven by the environment alone
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
