//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON (or pretty) lines on stdout
//! - A per-invocation logger carrying the request id
//! - Secret scrubbing

pub mod config;
pub mod logger;
pub mod secret_scrubbing;

pub use config::{LogConfig, LogFormat};
pub use logger::{LoggerImpl, TracingLogger};
pub use secret_scrubbing::SecretScrubber;
