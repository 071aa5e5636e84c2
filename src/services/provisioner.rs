//! Database provisioning flow (`rds-create-app-user`).
//!
//! Runs as the RDS master user: creates the target schema, then an admin
//! user with every privilege on it and an app user with DML privileges.
//! Every statement is idempotent, so a failed invocation is simply re-run;
//! nothing is rolled back. The `dragon` table used by the smoke test is not
//! created here.

use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use super::{log_failure, statements, SecretResolver};
use crate::domain::errors::ProvisionResult;
use crate::domain::models::{Config, CredentialPair, CredentialRole, Dsn, SecretTag, Setting, Statement};
use crate::domain::ports::{DatabaseConnector, DatabaseSession, Level, Logger};
use crate::infrastructure::config::ConfigError;

/// Result string returned to the trigger on success.
pub const PROVISION_SUCCESS: &str = "Database and user created successfully";

/// The configuration values the provisioner uses.
#[derive(Debug, Clone)]
pub struct ProvisionerSettings {
    /// Tag that locates the RDS master secret.
    pub master_tag: SecretTag,
    /// Database endpoint.
    pub host: String,
    /// Schema to create.
    pub database: String,
    /// Secret holding the admin user to create.
    pub admin_secret_id: String,
    /// Secret holding the app user to create.
    pub app_secret_id: String,
}

impl ProvisionerSettings {
    /// # Errors
    /// Returns `ConfigError::MissingSetting` for the first absent variable.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            master_tag: SecretTag::for_db_instance(
                config.require(Setting::AwsRegion)?,
                config.require(Setting::AwsAccount)?,
                config.require(Setting::DbId)?,
            ),
            host: config.require(Setting::DbHost)?.to_string(),
            database: config.require(Setting::DbName)?.to_string(),
            admin_secret_id: config.require(Setting::DbAdminSecretKey)?.to_string(),
            app_secret_id: config.require(Setting::DbAppSecretKey)?.to_string(),
        })
    }
}

/// Creates the schema, the admin user and the app user.
pub struct DatabaseProvisioner {
    resolver: SecretResolver,
    connector: Arc<dyn DatabaseConnector>,
    settings: ProvisionerSettings,
}

impl DatabaseProvisioner {
    /// Provisioner over the given secrets and database.
    pub fn new(
        resolver: SecretResolver,
        connector: Arc<dyn DatabaseConnector>,
        settings: ProvisionerSettings,
    ) -> Self {
        Self {
            resolver,
            connector,
            settings,
        }
    }

    /// Runs the whole provisioning sequence once.
    ///
    /// # Errors
    /// The first failing step's error; later steps are not attempted.
    #[instrument(skip_all, fields(database = %self.settings.database), err)]
    pub async fn run(&self, logger: &dyn Logger) -> ProvisionResult<String> {
        let tag = &self.settings.master_tag;
        logger.log(
            Level::Info,
            &format!("secret tag {}", tag.value),
            vec![("tag_key", json!(tag.key))],
        );

        let master = self
            .resolver
            .resolve_by_tag(tag, logger)
            .await
            .and_then(|pair| pair.ensure_complete(CredentialRole::Master))
            .map_err(|e| {
                log_failure(
                    logger,
                    "failed to get master secret value",
                    e,
                    vec![("secret_name", json!(tag.value))],
                )
            })?;

        let dsn = Dsn::server(master, &self.settings.host);
        let mut session = self.connector.connect(&dsn).await.map_err(|e| {
            log_failure(
                logger,
                "failed to connect to database",
                e,
                vec![("dsn", json!(dsn.to_string()))],
            )
        })?;

        let outcome = self.provision(session.as_mut(), logger).await;
        session.close().await;
        outcome?;

        logger.info("database and user created successfully");
        Ok(PROVISION_SUCCESS.to_string())
    }

    async fn provision(
        &self,
        session: &mut dyn DatabaseSession,
        logger: &dyn Logger,
    ) -> ProvisionResult<()> {
        let database = self.settings.database.as_str();

        self.execute(session, statements::create_database(database), logger)
            .await?;

        let admin = self
            .resolve(&self.settings.admin_secret_id, CredentialRole::Admin, logger)
            .await?;
        self.execute(session, statements::create_user("create admin user", &admin), logger)
            .await?;
        self.execute(
            session,
            statements::grant_all_privileges(database, &admin.username),
            logger,
        )
        .await?;

        let app = self
            .resolve(&self.settings.app_secret_id, CredentialRole::App, logger)
            .await?;
        self.execute(session, statements::create_user("create app user", &app), logger)
            .await?;
        self.execute(
            session,
            statements::grant_app_privileges(database, &app.username),
            logger,
        )
        .await?;

        self.execute(session, statements::flush_privileges(), logger)
            .await?;
        Ok(())
    }

    async fn resolve(
        &self,
        secret_id: &str,
        role: CredentialRole,
        logger: &dyn Logger,
    ) -> ProvisionResult<CredentialPair> {
        self.resolver
            .resolve_by_id(secret_id)
            .await
            .and_then(|pair| pair.ensure_complete(role))
            .map_err(|e| {
                log_failure(
                    logger,
                    &format!("failed to get {role} secret value"),
                    e,
                    vec![("secret_name", json!(secret_id))],
                )
            })
    }

    async fn execute(
        &self,
        session: &mut dyn DatabaseSession,
        statement: Statement,
        logger: &dyn Logger,
    ) -> ProvisionResult<()> {
        logger.log(
            Level::Debug,
            statement.purpose(),
            vec![("sql", json!(statement.loggable()))],
        );
        session.execute(&statement).await.map(|_| ()).map_err(|e| {
            log_failure(
                logger,
                &format!("failed to {}", statement.purpose()),
                e,
                vec![("database", json!(self.settings.database))],
            )
        })
    }
}
