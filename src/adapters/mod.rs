//! Adapters for the secret store and database ports.
//!
//! `mock` holds in-memory implementations used by the unit and
//! integration tests.

pub mod mock;
pub mod mysql;
pub mod secrets_manager;

pub use mysql::MySqlConnector;
pub use secrets_manager::SecretsManagerStore;
