use std::io;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Errors raised while setting up logging.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TelemetryError {
	#[error("Invalid log level: {0}")]
	InvalidLogLevel(String),

	#[error("Logger already initialized: {0}")]
	AlreadyInitialized(String),
}

const VALID_LEVELS: &[&str] = &["off", "trace", "debug", "info", "warn", "error"];

/// Custom time formatter that displays time as "YYYY-MM-DD HH:MM:SS.micros"
struct CustomTimeFormat;

impl FormatTime for CustomTimeFormat {
	fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
		let now = std::time::SystemTime::now();
		let datetime: chrono::DateTime<chrono::Local> = now.into();
		write!(w, "{}", datetime.format("[%Y-%m-%d %H:%M:%S%.6f]"))
	}
}

/// Validate a log level name and return it in lowercase.
pub fn parse_level(level: &str) -> Result<String, TelemetryError> {
	let level_lower = level.trim().to_lowercase();
	if !VALID_LEVELS.contains(&level_lower.as_str()) {
		return Err(TelemetryError::InvalidLogLevel(level.to_string()));
	}
	Ok(level_lower)
}

/// Initialize the logger with the provided log level
///
/// Records from both `tracing` and the `log` facade are written to stderr,
/// leaving stdout free for encoded output.
///
/// # Example
///
/// ```no_run
/// telemetry::init("debug")?;
/// # Ok::<(), telemetry::TelemetryError>(())
/// ```
///
/// # Errors
///
/// Returns an error if the level is not one of `off`, `trace`, `debug`,
/// `info`, `warn`, `error`, or if a global logger is already installed.
pub fn init(level: &str) -> Result<(), TelemetryError> {
	let level = parse_level(level)?;

	tracing_subscriber::registry()
		.with(EnvFilter::new(&level))
		.with(
			fmt::layer()
				.with_writer(io::stderr)
				.with_timer(CustomTimeFormat)
				.with_target(false)
				.with_thread_ids(false)
				.with_line_number(false)
				.with_file(false),
		)
		.try_init()
		.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}
