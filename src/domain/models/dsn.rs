//! Connection targets.

use std::fmt;

use super::CredentialPair;

/// Default MySQL port when the configured host carries none.
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Everything needed to open one database connection.
///
/// `Display` renders `user:***@tcp(host)/database` so a DSN can be logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Dsn {
    /// Login used for the connection.
    pub credential: CredentialPair,
    /// `host`, `host:port` or `[ipv6]:port`.
    pub host: String,
    /// Default schema, if any.
    pub database: Option<String>,
}

impl Dsn {
    /// Server-level DSN, no default schema selected.
    pub fn server(credential: CredentialPair, host: impl Into<String>) -> Self {
        Self {
            credential,
            host: host.into(),
            database: None,
        }
    }

    /// DSN scoped to `database`.
    pub fn schema(
        credential: CredentialPair,
        host: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            credential,
            host: host.into(),
            database: Some(database.into()),
        }
    }

    /// Split `host[:port]` into its parts.
    ///
    /// IPv6 literals take a port only in brackets (`[::1]:3307`); a bare
    /// address such as `::1` is the whole host on the default port.
    /// Returns `None` when the port suffix is present but not a valid number.
    pub fn host_and_port(&self) -> Option<(&str, u16)> {
        let host = self.host.as_str();
        if let Some(rest) = host.strip_prefix('[') {
            let (address, suffix) = rest.split_once(']')?;
            return match suffix {
                "" => Some((address, DEFAULT_MYSQL_PORT)),
                _ => suffix
                    .strip_prefix(':')?
                    .parse()
                    .ok()
                    .map(|port| (address, port)),
            };
        }
        match host.rsplit_once(':') {
            Some((name, _)) if name.contains(':') => Some((host, DEFAULT_MYSQL_PORT)),
            Some((name, port)) => port.parse().ok().map(|port| (name, port)),
            None => Some((host, DEFAULT_MYSQL_PORT)),
        }
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:***@tcp({})/{}",
            self.credential.username,
            self.host,
            self.database.as_deref().unwrap_or_default()
        )
    }
}

impl fmt::Debug for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dsn({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_redacts_password() {
        let dsn = Dsn::schema(CredentialPair::new("appu", "s3cret"), "db.local", "appdb");
        assert_eq!(dsn.to_string(), "appu:***@tcp(db.local)/appdb");
        assert!(!format!("{dsn:?}").contains("s3cret"));
    }

    #[test]
    fn test_server_dsn_has_no_schema() {
        let dsn = Dsn::server(CredentialPair::new("admin", "pw"), "db.local");
        assert!(dsn.database.is_none());
        assert_eq!(dsn.to_string(), "admin:***@tcp(db.local)/");
    }

    #[test]
    fn test_host_and_port() {
        let with_port = Dsn::server(CredentialPair::default(), "db.local:3307");
        assert_eq!(with_port.host_and_port(), Some(("db.local", 3307)));

        let without_port = Dsn::server(CredentialPair::default(), "db.local");
        assert_eq!(without_port.host_and_port(), Some(("db.local", DEFAULT_MYSQL_PORT)));

        let bad_port = Dsn::server(CredentialPair::default(), "db.local:abc");
        assert_eq!(bad_port.host_and_port(), None);
    }

    #[test]
    fn test_ipv6_hosts() {
        let bracketed = Dsn::server(CredentialPair::default(), "[2001:db8::5]:3307");
        assert_eq!(bracketed.host_and_port(), Some(("2001:db8::5", 3307)));

        let bracketed_no_port = Dsn::server(CredentialPair::default(), "[::1]");
        assert_eq!(bracketed_no_port.host_and_port(), Some(("::1", DEFAULT_MYSQL_PORT)));

        let bare = Dsn::server(CredentialPair::default(), "2001:db8::5");
        assert_eq!(bare.host_and_port(), Some(("2001:db8::5", DEFAULT_MYSQL_PORT)));

        let unclosed = Dsn::server(CredentialPair::default(), "[::1:3307");
        assert_eq!(unclosed.host_and_port(), None);

        let junk_after_bracket = Dsn::server(CredentialPair::default(), "[::1]3307");
        assert_eq!(junk_after_bracket.host_and_port(), None);
    }
}
