//! Application smoke test (`rds-app`).
//!
//! Connects as the app user to the provisioned schema, inserts the fixed
//! rows and logs every row read back. Rows that fail to decode are logged
//! and skipped; the read loop never stops early.

use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use super::{log_failure, statements, SecretResolver};
use crate::domain::errors::ProvisionResult;
use crate::domain::models::{Config, CredentialRole, Dsn, Setting};
use crate::domain::ports::{DatabaseConnector, DatabaseSession, Level, Logger};
use crate::infrastructure::config::ConfigError;

/// Result string returned to the trigger on success.
pub const SMOKE_TEST_SUCCESS: &str = "app operations successfully";

/// The configuration values the smoke test uses.
#[derive(Debug, Clone)]
pub struct SmokeTestSettings {
    /// Database endpoint.
    pub host: String,
    /// Schema holding the `dragon` table.
    pub database: String,
    /// Secret holding the app user.
    pub app_secret_id: String,
}

impl SmokeTestSettings {
    /// # Errors
    /// Returns `ConfigError::MissingSetting` for the first absent variable.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            host: config.require(Setting::DbHost)?.to_string(),
            database: config.require(Setting::DbName)?.to_string(),
            app_secret_id: config.require(Setting::DbAppSecretKey)?.to_string(),
        })
    }
}

/// Writes three dragons as the app user and reads the table back.
pub struct DatabaseSmokeTest {
    resolver: SecretResolver,
    connector: Arc<dyn DatabaseConnector>,
    settings: SmokeTestSettings,
}

impl DatabaseSmokeTest {
    /// Smoke test over the given secrets and database.
    pub fn new(
        resolver: SecretResolver,
        connector: Arc<dyn DatabaseConnector>,
        settings: SmokeTestSettings,
    ) -> Self {
        Self {
            resolver,
            connector,
            settings,
        }
    }

    /// Inserts the dragons, then logs every row of the table.
    /// 
    /// # Errors
    /// Any fatal failure, already logged. Row scan failures are logged and skipped.
    #[instrument(skip_all, fields(database = %self.settings.database), err)]
    pub async fn run(&self, logger: &dyn Logger) -> ProvisionResult<String> {
        let secret_id = self.settings.app_secret_id.as_str();
        let app = self
            .resolver
            .resolve_by_id(secret_id)
            .await
            .and_then(|pair| pair.ensure_complete(CredentialRole::App))
            .map_err(|e| {
                log_failure(
                    logger,
                    "failed to get app db secret value",
                    e,
                    vec![("secret_name", json!(secret_id))],
                )
            })?;

        let dsn = Dsn::schema(app, &self.settings.host, &self.settings.database);
        let mut session = self.connector.connect(&dsn).await.map_err(|e| {
            log_failure(
                logger,
                "failed to connect to database",
                e,
                vec![("dsn", json!(dsn.to_string()))],
            )
        })?;

        let outcome = self.exercise(session.as_mut(), logger).await;
        session.close().await;
        outcome?;

        logger.info("app operations successfully");
        Ok(SMOKE_TEST_SUCCESS.to_string())
    }

    async fn exercise(
        &self,
        session: &mut dyn DatabaseSession,
        logger: &dyn Logger,
    ) -> ProvisionResult<()> {
        let database = json!(self.settings.database);

        let insert = statements::insert_dragons();
        session.execute(&insert).await.map_err(|e| {
            log_failure(logger, "failed to create data", e, vec![("database", database.clone())])
        })?;

        let select = statements::select_dragons();
        let rows = session.fetch_dragons(&select).await.map_err(|e| {
            log_failure(logger, "failed to read data", e, vec![("database", database.clone())])
        })?;

        for row in rows {
            match row {
                Ok(row) => logger.log(
                    Level::Info,
                    "dragon row",
                    vec![
                        ("id", json!(row.id)),
                        ("name", json!(row.name)),
                        ("created_at", json!(row.created_at)),
                    ],
                ),
                Err(e) => {
                    log_failure(logger, "scanning data row", e, Vec::new());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockDatabase, MockSecretStore, RecordingLogger};
    use crate::domain::errors::ProvisionError;
    use crate::domain::models::DragonRow;

    fn settings() -> SmokeTestSettings {
        SmokeTestSettings {
            host: "db.internal".to_string(),
            database: "appdb".to_string(),
            app_secret_id: "app-secret".to_string(),
        }
    }

    fn smoke_test(store: MockSecretStore, db: &MockDatabase) -> DatabaseSmokeTest {
        DatabaseSmokeTest::new(
            SecretResolver::new(Arc::new(store)),
            Arc::new(db.clone()),
            settings(),
        )
    }

    fn app_store() -> MockSecretStore {
        MockSecretStore::new().with_secret("app-secret", r#"{"username":"appu","password":"p2"}"#)
    }

    #[tokio::test]
    async fn test_connects_with_schema() {
        let db = MockDatabase::new();
        let logger = RecordingLogger::new();

        let result = smoke_test(app_store(), &db).run(&logger).await.unwrap();

        assert_eq!(result, SMOKE_TEST_SUCCESS);
        assert_eq!(db.connects()[0].database.as_deref(), Some("appdb"));
        assert_eq!(db.open_sessions(), 0);
    }

    #[tokio::test]
    async fn test_empty_password_fails_before_connecting() {
        let db = MockDatabase::new();
        let logger = RecordingLogger::new();
        let store =
            MockSecretStore::new().with_secret("app-secret", r#"{"username":"appu","password":""}"#);

        let err = smoke_test(store, &db).run(&logger).await.unwrap_err();

        assert!(matches!(err, ProvisionError::Credential(CredentialRole::App)));
        assert!(db.connects().is_empty());
    }

    #[tokio::test]
    async fn test_rows_are_logged_in_order() {
        let db = MockDatabase::new().with_rows(vec![
            Ok(DragonRow::new(1, "Alice", "2024-01-01 00:00:00")),
            Ok(DragonRow::new(2, "Bob", "2024-01-01 00:00:01")),
        ]);
        let logger = RecordingLogger::new();

        smoke_test(app_store(), &db).run(&logger).await.unwrap();

        let names: Vec<_> = logger
            .records()
            .into_iter()
            .filter(|r| r.message == "dragon row")
            .filter_map(|r| r.field("name").cloned())
            .collect();
        assert_eq!(names, vec![json!("Alice"), json!("Bob")]);
    }
}
