//! MySQL adapters built on sqlx.

pub mod connection;
pub mod session;

use chrono::NaiveDateTime;

use crate::domain::errors::{ProvisionError, ProvisionResult};

pub use connection::{connect_options, verify_connection, MySqlConnector};
pub use session::MySqlSession;

/// Format used when rendering a `created_at` value for the log.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a MySQL `DATETIME`/`TIMESTAMP` text value, with or without
/// fractional seconds.
pub fn parse_datetime(s: &str) -> ProvisionResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .map_err(|e| ProvisionError::RowScan(format!("invalid timestamp {s:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime() {
        let ts = parse_datetime("2024-03-01 12:30:45").unwrap();
        assert_eq!(ts.format(TIMESTAMP_FORMAT).to_string(), "2024-03-01 12:30:45");

        let ts = parse_datetime("2024-03-01 12:30:45.123456").unwrap();
        assert_eq!(ts.format(TIMESTAMP_FORMAT).to_string(), "2024-03-01 12:30:45");
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(ProvisionError::RowScan(_))
        ));
    }
}
