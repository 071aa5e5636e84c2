//! Domain errors for the rds-bootstrap handlers.

use thiserror::Error;

use crate::domain::models::CredentialRole;

/// Errors that can end (or, for row scans, be logged during) an invocation.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A required setting is missing or the configuration failed to load.
    #[error("unable to load configuration: {0}")]
    ConfigLoad(String),

    /// The secret store call failed.
    #[error("failed to get secret value for {secret_id}: {reason}")]
    SecretFetch {
        /// Secret id, or the tag filter for a listing.
        secret_id: String,
        /// Store error, with its context chain.
        reason: String,
    },

    /// The payload is not a JSON object of string fields.
    #[error("failed to decode secret {secret_id}: {reason}")]
    Decode {
        /// Secret that failed to decode.
        secret_id: String,
        /// Error class and position; never the payload itself.
        reason: String,
    },

    /// Username or password decoded empty.
    #[error("{0} credentials are empty")]
    Credential(CredentialRole),

    /// Open or ping failed, or the host could not be parsed.
    #[error("failed to connect to database: {0}")]
    Connection(String),

    /// A statement or query was rejected.
    #[error("failed to {purpose}: {reason}")]
    Statement {
        /// What the statement was for, e.g. "create admin user".
        purpose: &'static str,
        /// Server or driver error.
        reason: String,
    },

    /// Non-fatal: a single result row could not be decoded.
    #[error("scanning data row: {0}")]
    RowScan(String),
}

impl ProvisionError {
    /// Whether this error aborts the invocation.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::RowScan(_))
    }

    /// Short machine-readable kind used as a structured log field.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ConfigLoad(_) => "config_load",
            Self::SecretFetch { .. } => "secret_fetch",
            Self::Decode { .. } => "decode",
            Self::Credential(_) => "credential",
            Self::Connection(_) => "connection",
            Self::Statement { .. } => "statement",
            Self::RowScan(_) => "row_scan",
        }
    }
}

/// Result alias for domain operations.
pub type ProvisionResult<T> = Result<T, ProvisionError>;

impl From<crate::infrastructure::config::ConfigError> for ProvisionError {
    fn from(err: crate::infrastructure::config::ConfigError) -> Self {
        Self::ConfigLoad(err.to_string())
    }
}
