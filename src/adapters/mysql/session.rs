//! A single open MySQL connection behind the [`DatabaseSession`] port.
//!
//! Statements go over the text protocol (`&str` executor) rather than as
//! prepared statements; MySQL refuses to prepare `CREATE USER`, `GRANT`
//! and `FLUSH` in some server versions.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use futures::{Stream, TryStreamExt};
use sqlx::mysql::{MySqlConnection, MySqlRow};
use sqlx::{Connection, Executor, Row};
use tracing::warn;

use super::{parse_datetime, TIMESTAMP_FORMAT};
use crate::domain::errors::{ProvisionError, ProvisionResult};
use crate::domain::models::{DragonRow, Statement};
use crate::domain::ports::DatabaseSession;

/// [`DatabaseSession`] over one owned connection.
pub struct MySqlSession {
    conn: MySqlConnection,
}

impl MySqlSession {
    /// Wrap a connection that has already been verified.
    pub fn new(conn: MySqlConnection) -> Self {
        Self { conn }
    }
}

fn statement_error(statement: &Statement, e: sqlx::Error) -> ProvisionError {
    ProvisionError::Statement {
        purpose: statement.purpose(),
        reason: e.to_string(),
    }
}

/// Decode a `SELECT *` row of the dragon table as `(id, name, created_at)`.
fn decode_dragon(row: &MySqlRow) -> ProvisionResult<DragonRow> {
    let scan = |e: sqlx::Error| ProvisionError::RowScan(e.to_string());

    let id: i64 = row.try_get(0).map_err(scan)?;
    let name: String = row.try_get(1).map_err(scan)?;
    let created_at = match row.try_get::<NaiveDateTime, _>(2) {
        Ok(ts) => ts,
        Err(_) => parse_datetime(&row.try_get::<String, _>(2).map_err(scan)?)?,
    };

    Ok(DragonRow::new(
        id,
        name,
        created_at.format(TIMESTAMP_FORMAT).to_string(),
    ))
}

/// Reads a result set to the end, decoding each row on its own.
///
/// An error before the first row means the query itself failed. An error
/// after rows have been read ends the read: the rows so far are kept and the
/// failure is appended as a `RowScan` entry.
async fn drain_rows<S, R, F>(
    mut stream: S,
    statement: &Statement,
    decode: F,
) -> ProvisionResult<Vec<Result<DragonRow, ProvisionError>>>
where
    S: Stream<Item = Result<R, sqlx::Error>> + Unpin,
    F: Fn(&R) -> ProvisionResult<DragonRow>,
{
    let mut rows = Vec::new();
    loop {
        match stream.try_next().await {
            Ok(Some(row)) => rows.push(decode(&row)),
            Ok(None) => break,
            Err(e) if rows.is_empty() => return Err(statement_error(statement, e)),
            Err(e) => {
                rows.push(Err(ProvisionError::RowScan(format!(
                    "reading result set after {} rows: {e}",
                    rows.len()
                ))));
                break;
            }
        }
    }
    Ok(rows)
}

#[async_trait]
impl DatabaseSession for MySqlSession {
    async fn execute(&mut self, statement: &Statement) -> ProvisionResult<u64> {
        let result = (&mut self.conn)
            .execute(statement.sql())
            .await
            .map_err(|e| statement_error(statement, e))?;
        Ok(result.rows_affected())
    }

    async fn fetch_dragons(
        &mut self,
        statement: &Statement,
    ) -> ProvisionResult<Vec<Result<DragonRow, ProvisionError>>> {
        let stream = (&mut self.conn).fetch(statement.sql());
        drain_rows(stream, statement, decode_dragon).await
    }

    async fn close(self: Box<Self>) {
        if let Err(e) = self.conn.close().await {
            warn!(error = %e, "failed to close database connection cleanly");
        }
    }
}
