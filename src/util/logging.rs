//! Structured logging setup for sphinx-project
//!
//! Every event is rendered as one pipe-delimited line on standard output:
//!
//! ```text
//! 2026-10-19 12:00:00.123|INFO|main|sphinx_project::project::build|build|build.rs|42: create env
//! ```
//!
//! The columns are timestamp, level, thread, target, the innermost span (each
//! operation runs in a span named after itself) or the module path when there
//! is none, file and line. The same layout, written as a Python logging format,
//! is handed to the test runner so its output lines up with ours.
//!
//! # Example
//!
//! ```no_run
//! use sphinx_project::util::{init_logging, LoggingConfig};
//! use tracing::Level;
//!
//! let config = LoggingConfig::with_level(Level::DEBUG);
//! init_logging(&config);
//!
//! tracing::info!("Application started");
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Once;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Python logging rendering of [`PipeFormat`], passed to pytest's `--log-cli-format`
const PYTHON_LOG_FORMAT: &str = concat!(
    "%(asctime)s|%(levelname)s|%(threadName)s|%(name)s|",
    "%(funcName)s|%(filename)s|%(lineno)d: %(message)s"
);

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Configuration for logging initialization
///
/// Built once from the command line and handed to every component that needs
/// to know about logging (the test operation forwards its format).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Include file and line columns
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            include_location: true,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Log line layout in Python `logging` syntax, for the test runner
    pub fn test_runner_format(&self) -> &'static str {
        PYTHON_LOG_FORMAT
    }
}

/// Parses a log level as given on the command line
///
/// Accepts the Python level names (DEBUG, INFO, WARNING, ERROR, CRITICAL) in
/// any case, plus `trace` and `warn`. CRITICAL maps to ERROR.
pub fn parse_log_level(level_str: &str) -> Result<Level, String> {
    match level_str.to_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARNING" | "WARN" => Ok(Level::WARN),
        "ERROR" | "CRITICAL" => Ok(Level::ERROR),
        _ => Err(format!(
            "Invalid log level '{}'. Valid levels: DEBUG, INFO, WARNING, ERROR, CRITICAL",
            level_str
        )),
    }
}

/// Initializes the logging system
///
/// Only the first call has an effect. `RUST_LOG`, when set, takes precedence
/// over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(config.level).into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(PipeFormat::new(config.include_location))
                    .with_ansi(false)
                    .with_writer(std::io::stdout),
            )
            .try_init();
    });
}

/// Pipe-delimited event formatter
#[derive(Debug, Clone, Copy)]
pub struct PipeFormat {
    include_location: bool,
}

impl PipeFormat {
    pub fn new(include_location: bool) -> Self {
        Self { include_location }
    }
}

fn level_name(level: &Level) -> &'static str {
    if *level == Level::WARN {
        "WARNING"
    } else {
        level.as_str()
    }
}

impl<S, N> FormatEvent<S, N> for PipeFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let thread = std::thread::current();

        let function = ctx
            .lookup_current()
            .map(|span| span.name())
            .or_else(|| meta.module_path())
            .unwrap_or("-");

        write!(
            writer,
            "{}|{}|{}|{}|{}",
            chrono::Local::now().format(TIMESTAMP_FORMAT),
            level_name(meta.level()),
            thread.name().unwrap_or("unnamed"),
            meta.target(),
            function,
        )?;

        if self.include_location {
            let file = meta
                .file()
                .and_then(|f| Path::new(f).file_name())
                .and_then(|f| f.to_str())
                .unwrap_or("-");
            write!(writer, "|{}|{}", file, meta.line().unwrap_or(0))?;
        }

        write!(writer, ": ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
