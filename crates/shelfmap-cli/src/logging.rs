//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.
//!
//! # Log Levels
//!
//! - `error`: Rule category failures
//! - `warn`: Reconciliation mismatches, date defaults, unmatched credits
//! - `info`: Load and population summaries
//! - `debug`: Per-category fields written
//! - `trace`: Everything else

use std::fmt;
use std::io;
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt as subscriber_fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter.
    pub level: Level,
    /// Whether to include the module path in log output.
    pub with_target: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}. Use pretty, compact, or json.", s)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from the `-v` count.
    ///
    /// - 0: warn
    /// - 1: info
    /// - 2: debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            with_target: verbosity >= 2,
            ..Default::default()
        }
    }

    /// Set output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) {
    let filter = build_env_filter(config.level);

    match config.format {
        LogFormat::Json => {
            let layer = subscriber_fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_target(config.with_target);

            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogFormat::Compact => {
            let layer = subscriber_fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .without_time();

            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogFormat::Pretty => {
            let layer = subscriber_fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .without_time();

            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }
}

/// Build an `EnvFilter` from the given level, letting `RUST_LOG` override it.
fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Dependencies stay at warn
        EnvFilter::new(format!("warn,shelfmap={level},shelfmap_cli={level}"))
    })
}
