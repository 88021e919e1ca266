//! Structured diagnostics for the netweave binary.
//!
//! Events are emitted through `tracing` to stderr, keeping stdout reserved
//! for command output. The level filter comes from `RUST_LOG` and the event
//! encoding from `NETWEAVE_LOG_FORMAT`; `log` records from dependencies are
//! routed into the same subscriber.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt,
};

const FORMAT_VAR: &str = "NETWEAVE_LOG_FORMAT";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Output encodings supported for diagnostic events.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Plain text for interactive use.
    #[default]
    Human,
    /// Newline-delimited JSON for log shippers.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(LoggingError::UnknownFormat {
                value: raw.trim().to_owned(),
            }),
        }
    }
}

/// Errors raised while reading the logging configuration.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum LoggingError {
    /// `NETWEAVE_LOG_FORMAT` named an encoding this binary does not emit.
    #[error("NETWEAVE_LOG_FORMAT must be `human` or `json`, got `{value}`")]
    UnknownFormat {
        /// The rejected value, trimmed.
        value: String,
    },
    /// `NETWEAVE_LOG_FORMAT` held bytes that are not valid Unicode.
    #[error("NETWEAVE_LOG_FORMAT is not valid Unicode")]
    NonUnicodeValue,
}

fn requested_format() -> Result<LogFormat, LoggingError> {
    match env::var(FORMAT_VAR) {
        Ok(raw) => raw.parse(),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(env::VarError::NotUnicode(_)) => Err(LoggingError::NonUnicodeValue),
    }
}

/// Installs the global `tracing` subscriber for the binary.
///
/// The level filter is taken from `RUST_LOG`, defaulting to `info`. Calling
/// this more than once, or alongside a subscriber installed elsewhere (as
/// the test harness does), is harmless: the first installation wins and
/// later calls return `Ok`.
///
/// # Errors
/// Returns [`LoggingError`] when `NETWEAVE_LOG_FORMAT` is unreadable or
/// names an unknown encoding.
pub fn init_logging() -> Result<(), LoggingError> {
    let format = requested_format()?;
    if INSTALLED.set(()).is_err() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let sink = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let sink = match format {
        LogFormat::Human => sink.boxed(),
        LogFormat::Json => sink.json().boxed(),
    };

    // Bridge the `log` facade; an already-registered logger keeps the slot.
    let _ = LogTracer::init();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(sink)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::bare("human", LogFormat::Human)]
    #[case::upper("JSON", LogFormat::Json)]
    #[case::padded("  json\t", LogFormat::Json)]
    #[case::empty("", LogFormat::Human)]
    fn log_format_parses_known_encodings(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(raw.parse::<LogFormat>(), Ok(expected));
    }

    #[test]
    fn log_format_rejects_unknown_encodings() {
        let err = "syslog".parse::<LogFormat>().expect_err("syslog is not emitted");
        assert_eq!(
            err,
            LoggingError::UnknownFormat {
                value: "syslog".into(),
            }
        );
    }

    #[test]
    fn unset_format_falls_back_to_human() {
        assert_eq!(LogFormat::default(), LogFormat::Human);
    }

    #[test]
    fn repeated_installation_is_harmless() {
        init_logging().expect("first call installs the subscriber");
        init_logging().expect("later calls are no-ops");
    }
}
