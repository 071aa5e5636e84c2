//! In-memory adapters for testing.
//!
//! Each mock records what the handlers did to it so tests can assert on the
//! exact calls, statements and log lines of an invocation.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::errors::{ProvisionError, ProvisionResult};
use crate::domain::models::{DragonRow, Dsn, SecretTag, Statement};
use crate::domain::ports::{
    DatabaseConnector, DatabaseSession, Fields, Level, Logger, SecretStore,
};

/// Mock secret store backed by a map of secret id to payload.
#[derive(Default)]
pub struct MockSecretStore {
    /// `None` payload models a binary (non-string) secret.
    secrets: HashMap<String, Option<String>>,
    tagged: Vec<(SecretTag, String)>,
    fetches: Arc<Mutex<Vec<String>>>,
    list_failure: Option<String>,
}

impl MockSecretStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a string secret.
    pub fn with_secret(mut self, id: impl Into<String>, payload: impl Into<String>) -> Self {
        self.secrets.insert(id.into(), Some(payload.into()));
        self
    }

    /// Adds a secret with no string payload.
    pub fn with_binary_secret(mut self, id: impl Into<String>) -> Self {
        self.secrets.insert(id.into(), None);
        self
    }

    /// Registers a secret that `list_secret_names` returns for `tag`.
    pub fn with_tagged_secret(
        mut self,
        tag: &SecretTag,
        name: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.tagged.push((tag.clone(), name.clone()));
        self.secrets.insert(name, Some(payload.into()));
        self
    }

    /// Makes every tag listing fail with `reason`.
    pub fn with_list_failure(mut self, reason: impl Into<String>) -> Self {
        self.list_failure = Some(reason.into());
        self
    }

    /// Shared handle to the ids passed to `get_secret_string`, in call order.
    pub fn fetch_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.fetches)
    }
}

#[async_trait]
impl SecretStore for MockSecretStore {
    async fn get_secret_string(&self, secret_id: &str) -> ProvisionResult<Option<String>> {
        self.fetches.lock().unwrap_or_else(PoisonError::into_inner).push(secret_id.to_string());
        self.secrets
            .get(secret_id)
            .cloned()
            .ok_or_else(|| ProvisionError::SecretFetch {
                secret_id: secret_id.to_string(),
                reason: "ResourceNotFoundException: secret not found".to_string(),
            })
    }

    async fn list_secret_names(&self, tag: &SecretTag) -> ProvisionResult<Vec<String>> {
        if let Some(reason) = &self.list_failure {
            return Err(ProvisionError::SecretFetch {
                secret_id: tag.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self
            .tagged
            .iter()
            .filter(|(t, _)| t == tag)
            .map(|(_, name)| name.clone())
            .collect())
    }
}

/// Observable state shared by a [`MockDatabase`] and its sessions.
#[derive(Debug, Default)]
struct MockDatabaseState {
    connects: Vec<Dsn>,
    executed: Vec<String>,
    queries: Vec<String>,
    grants: BTreeSet<String>,
    closed: usize,
}

/// Mock database server.
///
/// Sessions append every executed statement to a shared journal. GRANT
/// statements also land in a set, so repeating them leaves it unchanged the
/// way repeating a grant on a real server does.
#[derive(Clone, Default)]
pub struct MockDatabase {
    state: Arc<Mutex<MockDatabaseState>>,
    connect_failure: Option<String>,
    statement_failure: Option<String>,
    rows: Vec<Result<DragonRow, String>>,
}

impl MockDatabase {
    /// Database with no failures and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every connect fail with `reason`.
    pub fn with_connect_failure(mut self, reason: impl Into<String>) -> Self {
        self.connect_failure = Some(reason.into());
        self
    }

    /// Fail any statement whose SQL contains `fragment`.
    pub fn with_statement_failure(mut self, fragment: impl Into<String>) -> Self {
        self.statement_failure = Some(fragment.into());
        self
    }

    /// Rows returned by every query; an `Err` models an undecodable row.
    pub fn with_rows(mut self, rows: Vec<Result<DragonRow, String>>) -> Self {
        self.rows = rows;
        self
    }

    /// Every DSN passed to `connect`, in order.
    pub fn connects(&self) -> Vec<Dsn> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).connects.clone()
    }

    /// Loggable SQL of every executed statement.
    pub fn executed(&self) -> Vec<String> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).executed.clone()
    }

    /// SQL of every row query.
    pub fn queries(&self) -> Vec<String> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).queries.clone()
    }

    /// Distinct GRANT statements seen.
    pub fn grants(&self) -> BTreeSet<String> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).grants.clone()
    }

    /// Sessions opened but not yet closed.
    pub fn open_sessions(&self) -> usize {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.connects.len() - state.closed
    }
}

#[async_trait]
impl DatabaseConnector for MockDatabase {
    async fn connect(&self, dsn: &Dsn) -> ProvisionResult<Box<dyn DatabaseSession>> {
        if let Some(reason) = &self.connect_failure {
            return Err(ProvisionError::Connection(reason.clone()));
        }
        self.state.lock().unwrap_or_else(PoisonError::into_inner).connects.push(dsn.clone());
        Ok(Box::new(MockSession {
            database: self.clone(),
        }))
    }
}

struct MockSession {
    database: MockDatabase,
}

impl MockSession {
    fn check(&self, statement: &Statement) -> ProvisionResult<()> {
        match &self.database.statement_failure {
            Some(fragment) if statement.sql().contains(fragment.as_str()) => {
                Err(ProvisionError::Statement {
                    purpose: statement.purpose(),
                    reason: format!("mock failure on '{fragment}'"),
                })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DatabaseSession for MockSession {
    async fn execute(&mut self, statement: &Statement) -> ProvisionResult<u64> {
        self.check(statement)?;
        let mut state = self.database.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.executed.push(statement.sql().to_string());
        if statement.sql().starts_with("GRANT") {
            state.grants.insert(statement.sql().to_string());
        }
        Ok(0)
    }

    async fn fetch_dragons(
        &mut self,
        statement: &Statement,
    ) -> ProvisionResult<Vec<Result<DragonRow, ProvisionError>>> {
        self.check(statement)?;
        self.database
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .queries
            .push(statement.sql().to_string());
        Ok(self
            .database
            .rows
            .iter()
            .map(|row| row.clone().map_err(ProvisionError::RowScan))
            .collect())
    }

    async fn close(self: Box<Self>) {
        self.database.state.lock().unwrap_or_else(PoisonError::into_inner).closed += 1;
    }
}

/// One captured log line.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Severity.
    pub level: Level,
    /// Message text.
    pub message: String,
    /// Structured context.
    pub fields: Fields,
}

impl LogRecord {
    /// Value of a structured field, if present.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Logger that keeps every line in memory.
#[derive(Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLogger {
    /// Logger with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Just the messages.
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    /// Lines logged at `level`.
    pub fn at_level(&self, level: Level) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: Level, message: &str, fields: Fields) {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).push(LogRecord {
            level,
            message: message.to_string(),
            fields,
        });
    }
}
