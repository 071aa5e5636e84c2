//! Database credentials decoded from secrets.

use serde::Deserialize;
use std::fmt;

use crate::domain::errors::{ProvisionError, ProvisionResult};

/// Username/password pair decoded from a secret's JSON payload.
///
/// Missing fields decode to empty strings; [`CredentialPair::ensure_complete`]
/// is what rejects them. The password is never rendered by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CredentialPair {
    /// Database login.
    #[serde(default)]
    pub username: String,
    /// Never logged.
    #[serde(default)]
    pub password: String,
}

impl CredentialPair {
    /// Pair from explicit values.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// True when either field is empty.
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() || self.password.is_empty()
    }

    /// Fail fast before a connection is attempted with an incomplete pair.
    pub fn ensure_complete(self, role: CredentialRole) -> ProvisionResult<Self> {
        if self.is_empty() {
            return Err(ProvisionError::Credential(role));
        }
        Ok(self)
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Which credential a handler is working with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialRole {
    /// RDS master user, discovered by tag.
    Master,
    /// Database owner with all privileges on the target schema.
    Admin,
    /// Application user with DML privileges.
    App,
}

impl CredentialRole {
    /// Lowercase label used in messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Admin => "admin",
            Self::App => "app",
        }
    }
}

impl fmt::Display for CredentialRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
