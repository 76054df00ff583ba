//! Structured logging initialisation via `tracing`.
//!
//! Two output formats are supported:
//! - [`LogFormat::Human`] — human-readable lines (development).
//! - [`LogFormat::Json`] — newline-delimited JSON (log aggregation).
//!
//! The filter level can be overridden at runtime via the `RUST_LOG`
//! environment variable. When `RUST_LOG` is not set, the caller-supplied
//! `level` string is used (e.g. `"info"`, `"debug,mines_ledger=trace"`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown log format {0:?} (expected \"human\" or \"json\")")]
pub struct ParseLogFormatError(String);

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(ParseLogFormatError(s.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Initialise the global tracing subscriber.
///
/// Logs go to stderr so that machine-readable command output on stdout stays
/// clean. Calling this twice is a no-op the second time.
pub fn init_logging(format: LogFormat, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let result = match format {
        LogFormat::Human => tracing_subscriber::registry()
            .with(filter)
            .with(tfmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tfmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!(%format, level, "logging initialised");
    }
}

/// Initialise the tracing subscriber with sensible defaults.
///
/// Respects the `RUST_LOG` environment variable for filtering.
pub fn init_tracing() {
    init_logging(LogFormat::Human, "info");
}
