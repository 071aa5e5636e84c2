//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//!
//! The port implementations that talk to AWS and MySQL live in `adapters`.

pub mod config;
pub mod logging;
