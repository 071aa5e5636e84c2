//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - Optional YAML file
//! - The ambient Lambda environment variables
//! - Prefixed environment overrides for nested settings
//! - Logging section validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
