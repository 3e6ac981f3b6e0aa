//! Global `tracing` subscriber
//!
//! `RUST_LOG` always wins for filtering. The output format follows the
//! deployment environment unless `LOG_FORMAT` names one explicitly.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

use crate::config::Environment;

/// Line format written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, with span open/close events
    Pretty,
    /// One line per event
    Compact,
    /// JSON lines for log shipping
    Json,
}

impl FromStr for LogFormat {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(TracingError::UnknownFormat(other.to_string())),
        }
    }
}

/// What the subscriber writes and at which default level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    /// Used when `RUST_LOG` is unset or unparsable
    pub default_level: Level,
}

impl LogSettings {
    /// Development logs debug and above in pretty form; every other
    /// environment logs info as JSON
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        if env.is_development() {
            Self {
                format: LogFormat::Pretty,
                default_level: Level::DEBUG,
            }
        } else {
            Self {
                format: LogFormat::Json,
                default_level: Level::INFO,
            }
        }
    }

    /// Replace the format with `LOG_FORMAT` when it is set to a known value
    #[must_use]
    pub fn with_format_override(mut self, value: Option<&str>) -> Self {
        if let Some(format) = value.and_then(|v| v.parse().ok()) {
            self.format = format;
        }
        self
    }

    fn layer(self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let base = tracing_subscriber::fmt::layer().with_target(true);
        match self.format {
            LogFormat::Pretty => base
                .pretty()
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .boxed(),
            LogFormat::Compact => base.compact().boxed(),
            LogFormat::Json => base.json().with_current_span(true).boxed(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::Compact,
            default_level: Level::INFO,
        }
    }
}

/// Install the subscriber for `env`, honoring `LOG_FORMAT`
///
/// # Errors
/// Returns `AlreadyInitialized` when a global subscriber is set
pub fn init_logging(env: Environment) -> Result<(), TracingError> {
    let settings = LogSettings::for_environment(env)
        .with_format_override(std::env::var("LOG_FORMAT").ok().as_deref());
    init_logging_with(settings)
}

/// Install a subscriber with explicit settings
///
/// # Errors
/// Returns `AlreadyInitialized` when a global subscriber is set
pub fn init_logging_with(settings: LogSettings) -> Result<(), TracingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.default_level.to_string()));

    tracing_subscriber::registry()
        .with(settings.layer())
        .with(filter)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,

    #[error("Unknown log format: {0}")]
    UnknownFormat(String),
}
