//! Domain models.

pub mod config;
pub mod credential;
pub mod dragon;
pub mod dsn;
pub mod secret_tag;
pub mod statement;

pub use config::{Config, LoggingConfig, Setting};
pub use credential::{CredentialPair, CredentialRole};
pub use dragon::DragonRow;
pub use dsn::{Dsn, DEFAULT_MYSQL_PORT};
pub use secret_tag::{SecretTag, PRIMARY_DB_INSTANCE_ARN_TAG};
pub use statement::Statement;
