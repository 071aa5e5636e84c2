//! rds-bootstrap - provisioning and smoke-testing an RDS MySQL database
//!
//! Two AWS Lambda functions share this crate:
//!
//! - `rds-create-app-user` resolves the RDS master credential by tag, creates
//!   the application schema, an admin user and an app user, and grants their
//!   privileges.
//! - `rds-app` connects as the app user, inserts a few rows into `dragon` and
//!   logs what it reads back.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): credential, DSN and statement models, the
//!   error type, and the ports
//! - **Service Layer** (`services`): the two flows and the SQL they issue
//! - **Adapters** (`adapters`): Secrets Manager, MySQL, and in-memory mocks
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **Application Layer** (`application`): per-invocation wiring used by the
//!   binaries
//!
//! # Example
//!
//! ```no_run
//! use rds_bootstrap::application::{handle, Handler};
//!
//! # async fn example() -> rds_bootstrap::ProvisionResult<()> {
//! let message = handle(Handler::CreateAppUser, "local-test").await?;
//! assert_eq!(message, "Database and user created successfully");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{handle, Handler};
pub use domain::errors::{ProvisionError, ProvisionResult};
pub use domain::models::{Config, CredentialPair, CredentialRole, DragonRow, Dsn, SecretTag};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{DatabaseProvisioner, DatabaseSmokeTest, SecretResolver};
