//! SQL statements with a purpose and a loggable form.

use std::fmt;

/// A fixed SQL statement together with what it is for.
///
/// Normally built by `services::statements`; `purpose` feeds error messages
/// ("failed to create admin user: ...").
#[derive(Clone, PartialEq, Eq)]
pub struct Statement {
    purpose: &'static str,
    sql: String,
    redacted: Option<String>,
}

impl Statement {
    /// Statement with no secret in it; its SQL is logged as is.
    pub fn new(purpose: &'static str, sql: impl Into<String>) -> Self {
        Self {
            purpose,
            sql: sql.into(),
            redacted: None,
        }
    }

    /// Statement whose SQL embeds a secret; `redacted` is what gets logged.
    pub fn with_secret(
        purpose: &'static str,
        sql: impl Into<String>,
        redacted: impl Into<String>,
    ) -> Self {
        Self {
            purpose,
            sql: sql.into(),
            redacted: Some(redacted.into()),
        }
    }

    /// What the statement does, as used in error messages.
    pub const fn purpose(&self) -> &'static str {
        self.purpose
    }

    /// SQL sent to the server. May contain a secret.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// SQL safe to write to logs.
    pub fn loggable(&self) -> &str {
        self.redacted.as_deref().unwrap_or(&self.sql)
    }
}

impl fmt::Debug for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("purpose", &self.purpose)
            .field("sql", &self.loggable())
            .finish()
    }
}
