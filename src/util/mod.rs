//! Utility modules for sphinx-project
//!
//! - Structured logging setup and configuration

pub mod logging;

pub use logging::{init_logging, parse_log_level, LoggingConfig};
