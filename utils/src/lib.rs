//! Shared utilities for the PPML registry.

pub mod logging;

pub use logging::{init_tracing_with, LogFormat, LoggingError};
