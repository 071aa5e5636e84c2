//! Redaction of credentials in log output.

use regex::Regex;
use std::fmt;

/// Scrubs credentials from log messages before they are emitted.
///
/// Covers the shapes a credential can take in this crate's messages:
/// `IDENTIFIED BY '...'` clauses, `password` fields in JSON or `key=value`
/// form, and `user:password@` DSN prefixes.
#[derive(Clone)]
pub struct SecretScrubber {
    identified_by_pattern: Regex,
    password_pattern: Regex,
    dsn_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new secret scrubber
    pub fn new() -> Self {
        Self {
            identified_by_pattern: Regex::new(r"(?i)IDENTIFIED\s+BY\s+'[^']*'")
                .expect("identified-by pattern is valid"),
            password_pattern: Regex::new(r#"["']?password["']?\s*[:=]\s*["']?([^"'\s,}]+)["']?"#)
                .expect("password pattern is valid"),
            dsn_pattern: Regex::new(r"(?P<user>[A-Za-z0-9_.-]+):[^:@\s/*]+@(?P<host>tcp\(|[A-Za-z0-9])")
                .expect("dsn pattern is valid"),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let mut scrubbed = self
            .identified_by_pattern
            .replace_all(message, "IDENTIFIED BY '[REDACTED]'")
            .to_string();
        scrubbed = self
            .password_pattern
            .replace_all(&scrubbed, "password=[REDACTED]")
            .to_string();
        scrubbed = self
            .dsn_pattern
            .replace_all(&scrubbed, "$user:[REDACTED]@$host")
            .to_string();
        scrubbed
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
