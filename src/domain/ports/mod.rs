//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that infrastructure adapters must implement:
//! - SecretStore: credential lookups by id or tag
//! - DatabaseConnector / DatabaseSession: one exclusive SQL connection
//! - Logger: structured, per-invocation logging
//!
//! The handlers depend only on these traits, so every flow can be exercised
//! against in-memory adapters.

pub mod database;
pub mod logger;
pub mod secret_store;

pub use database::{DatabaseConnector, DatabaseSession};
pub use logger::{Fields, Level, Logger};
pub use secret_store::SecretStore;
