//! Opening and verifying single MySQL connections.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, instrument};

use super::session::MySqlSession;
use crate::domain::errors::{ProvisionError, ProvisionResult};
use crate::domain::models::Dsn;
use crate::domain::ports::{DatabaseConnector, DatabaseSession};

/// Connector that opens one unpooled connection per session.
///
/// A handler issues a handful of statements and exits, so there is nothing
/// for a pool to amortize.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnector;

impl MySqlConnector {
    /// New connector.
    pub fn new() -> Self {
        Self
    }
}

/// Build connect options from a DSN.
///
/// Statement logging is disabled: `CREATE USER` statements carry passwords.
pub fn connect_options(dsn: &Dsn) -> ProvisionResult<MySqlConnectOptions> {
    let (host, port) = dsn
        .host_and_port()
        .ok_or_else(|| ProvisionError::Connection(format!("invalid database host: {}", dsn.host)))?;

    let options = MySqlConnectOptions::new()
        .host(host)
        .port(port)
        .username(&dsn.credential.username)
        .password(&dsn.credential.password)
        .disable_statement_logging();

    Ok(match &dsn.database {
        Some(database) => options.database(database),
        None => options,
    })
}

/// Ping an open connection.
pub async fn verify_connection(conn: &mut MySqlConnection) -> ProvisionResult<()> {
    conn.ping()
        .await
        .map_err(|e| ProvisionError::Connection(format!("failed to ping database: {e}")))
}

#[async_trait]
impl DatabaseConnector for MySqlConnector {
    #[instrument(skip(self, dsn), fields(dsn = %dsn), err)]
    async fn connect(&self, dsn: &Dsn) -> ProvisionResult<Box<dyn DatabaseSession>> {
        let mut conn = connect_options(dsn)?
            .connect()
            .await
            .map_err(|e| ProvisionError::Connection(format!("failed to open database: {e}")))?;

        if let Err(e) = verify_connection(&mut conn).await {
            let _ = conn.close().await;
            return Err(e);
        }

        debug!("database connection verified");
        Ok(Box::new(MySqlSession::new(conn)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CredentialPair;

    #[test]
    fn test_connect_options_accepts_host_with_port() {
        let dsn = Dsn::schema(CredentialPair::new("appu", "pw"), "db.local:3307", "appdb");
        assert!(connect_options(&dsn).is_ok());
    }

    #[test]
    fn test_connect_options_rejects_bad_port() {
        let dsn = Dsn::server(CredentialPair::new("master", "pw"), "db.local:notaport");
        let err = connect_options(&dsn).unwrap_err();
        assert!(matches!(err, ProvisionError::Connection(_)));
        assert!(err.to_string().contains("db.local:notaport"));
    }

    #[tokio::test]
    async fn test_connect_to_closed_port_is_connection_error() {
        let dsn = Dsn::server(CredentialPair::new("master", "pw"), "127.0.0.1:1");
        let err = MySqlConnector::new().connect(&dsn).await.err().unwrap();
        assert!(matches!(err, ProvisionError::Connection(_)));
    }
}
