use std::time::Duration;

use byt_domain::BytError;
use tracing::{info, warn};
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::{LogFormat, LogLevel};

/// Crates whose verbosity follows `--log-level`.
const BYT_TARGETS: [&str; 5] = ["byt", "byt_app", "byt_core", "byt_infra", "byt_common"];

/// Install the global tracing subscriber.
///
/// A non-empty, parseable `RUST_LOG` replaces the level-derived filter
/// entirely. Otherwise everything logs at `warn` and the `byt_*` crates at
/// `level`. Output goes to stderr so command output on stdout stays clean.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_tracing(level: LogLevel, format: LogFormat) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, rejected) = build_filter(level.as_tracing_level(), rust_log.as_deref());

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Pretty => {
            registry.with(fmt::layer().pretty().with_writer(std::io::stderr)).try_init()
        }
        LogFormat::Json => registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    if let Some(err) = rejected {
        warn!(error = %err, "Ignoring invalid RUST_LOG");
    }
}

/// Filter from `RUST_LOG` when it is usable, else from `level`.
///
/// A `RUST_LOG` that fails to parse is handed back so it can be reported
/// once the subscriber is running.
fn build_filter(level: tracing::Level, rust_log: Option<&str>) -> (EnvFilter, Option<ParseError>) {
    let mut rejected = None;
    if let Some(spec) = rust_log.map(str::trim).filter(|spec| !spec.is_empty()) {
        match EnvFilter::try_new(spec) {
            Ok(filter) => return (filter, None),
            Err(err) => rejected = Some(err),
        }
    }

    let filter = BYT_TARGETS.iter().fold(EnvFilter::new("warn"), |filter, krate| {
        match format!("{krate}={level}").parse::<Directive>() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        }
    });
    (filter, rejected)
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"operations::compose"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - The failure, if the command did not succeed.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&BytError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => warn!(
            command,
            duration_ms,
            error_type = error_label(err),
            error = %err,
            "command_execution_failure"
        ),
    }
}

/// Convert a `BytError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &BytError) -> &'static str {
    error.label()
}
