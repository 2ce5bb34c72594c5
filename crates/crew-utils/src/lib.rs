//! Shared utilities for stock-crew
//!
//! Logging setup and secret resolution used by the binaries.

pub mod config;
pub mod logging;

pub use config::{ConfigError, Secrets};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
