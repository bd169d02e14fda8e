// src/logging.rs

//! Subscriber setup for the `coursemap` binary.
//!
//! The filter comes from `--log-level` when given. Otherwise `COURSEMAP_LOG`
//! is read as a full `EnvFilter` directive list, so per-module levels work:
//!
//! ```text
//! COURSEMAP_LOG="info,coursemap::roadmap=debug" coursemap --course cs101
//! ```
//!
//! Without either, only `info` and above is shown. Logs go to stderr so the
//! roadmap and dashboard listings on stdout stay clean.

use anyhow::{anyhow, Result};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "COURSEMAP_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let mut rejected = None;
    let filter = match cli_level {
        Some(level) => EnvFilter::new(directive(level)),
        None => match std::env::var(LOG_ENV) {
            Ok(raw) => EnvFilter::try_new(&raw).unwrap_or_else(|_| {
                rejected = Some(raw);
                EnvFilter::new(DEFAULT_DIRECTIVE)
            }),
            Err(_) => EnvFilter::new(DEFAULT_DIRECTIVE),
        },
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;

    if let Some(raw) = rejected {
        warn!(env = LOG_ENV, value = %raw, "unparsable log filter; using {DEFAULT_DIRECTIVE}");
    }

    Ok(())
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
