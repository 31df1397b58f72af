//! # Observability
//!
//! Structured logging via `tracing`. The channelizer emits events; this
//! module installs a subscriber for applications and tests that want them.

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
