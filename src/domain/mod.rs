//! Domain layer for the rds-bootstrap handlers
//!
//! This module contains the credential and statement models, the error
//! taxonomy, and the port traits the adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ProvisionError, ProvisionResult};
