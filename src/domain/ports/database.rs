//! Database ports: a connector that opens sessions, and the session itself.
//!
//! A session is a single exclusive connection. Callers must `close` it on
//! every exit path; the handlers do so before returning.

use async_trait::async_trait;

use crate::domain::errors::{ProvisionError, ProvisionResult};
use crate::domain::models::{DragonRow, Dsn, Statement};

/// Opens sessions against a database server.
#[async_trait]
pub trait DatabaseConnector: Send + Sync {
    /// Opens a connection and verifies it with a ping.
    ///
    /// # Errors
    /// Returns `ProvisionError::Connection` if the open or the ping fails.
    async fn connect(&self, dsn: &Dsn) -> ProvisionResult<Box<dyn DatabaseSession>>;
}

/// One open connection.
#[async_trait]
pub trait DatabaseSession: Send {
    /// Executes a statement, returning the number of affected rows.
    ///
    /// # Errors
    /// Returns `ProvisionError::Statement` tagged with the statement's purpose.
    async fn execute(&mut self, statement: &Statement) -> ProvisionResult<u64>;

    /// Runs a query and decodes every row it returns.
    ///
    /// The outer error is a failed query; an inner `ProvisionError::RowScan`
    /// is a row that could not be decoded while the rest of the result set
    /// was still read. A result set that breaks off after some rows yields
    /// those rows followed by one trailing `RowScan`.
    async fn fetch_dragons(
        &mut self,
        statement: &Statement,
    ) -> ProvisionResult<Vec<Result<DragonRow, ProvisionError>>>;

    /// Releases the connection.
    async fn close(self: Box<Self>);
}
