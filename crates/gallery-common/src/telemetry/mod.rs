//! Logging setup

mod tracing_setup;

pub use tracing_setup::{init_logging, init_logging_with, LogFormat, LogSettings, TracingError};
