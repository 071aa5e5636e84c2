//! Handler selection, settings resolution and flow dispatch.

use serde_json::json;
use std::fmt;
use std::sync::Arc;

use crate::adapters::mysql::MySqlConnector;
use crate::adapters::secrets_manager::SecretsManagerStore;
use crate::domain::errors::{ProvisionError, ProvisionResult};
use crate::domain::models::Config;
use crate::domain::ports::{DatabaseConnector, Logger, SecretStore};
use crate::infrastructure::config::ConfigError;
use crate::services::{
    log_failure, DatabaseProvisioner, DatabaseSmokeTest, ProvisionerSettings, SecretResolver,
    SmokeTestSettings,
};

/// The two deployable functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// `rds-create-app-user`
    CreateAppUser,
    /// `rds-app`
    AppOperations,
}

impl Handler {
    /// Deployed function name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateAppUser => "rds-create-app-user",
            Self::AppOperations => "rds-app",
        }
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Clients a handler runs against.
#[derive(Clone)]
pub struct Handlers {
    store: Arc<dyn SecretStore>,
    connector: Arc<dyn DatabaseConnector>,
}

impl Handlers {
    /// Handlers over explicit clients.
    pub fn new(store: Arc<dyn SecretStore>, connector: Arc<dyn DatabaseConnector>) -> Self {
        Self { store, connector }
    }

    /// Secrets Manager from the ambient AWS configuration, MySQL over sqlx.
    pub async fn from_env() -> Self {
        Self::new(
            Arc::new(SecretsManagerStore::from_env().await),
            Arc::new(MySqlConnector::new()),
        )
    }

    /// Runs a handler whose settings have already been resolved.
    ///
    /// # Errors
    /// Whatever the flow itself returns, already logged.
    pub async fn run(&self, settings: HandlerSettings, logger: &dyn Logger) -> ProvisionResult<String> {
        let resolver = SecretResolver::new(Arc::clone(&self.store));
        match settings {
            HandlerSettings::CreateAppUser(settings) => {
                DatabaseProvisioner::new(resolver, Arc::clone(&self.connector), settings)
                    .run(logger)
                    .await
            }
            HandlerSettings::AppOperations(settings) => {
                DatabaseSmokeTest::new(resolver, Arc::clone(&self.connector), settings)
                    .run(logger)
                    .await
            }
        }
    }
}

/// The configuration values one handler needs, checked for presence.
#[derive(Debug, Clone)]
pub enum HandlerSettings {
    /// Settings for `rds-create-app-user`.
    CreateAppUser(ProvisionerSettings),
    /// Settings for `rds-app`.
    AppOperations(SmokeTestSettings),
}

impl HandlerSettings {
    /// # Errors
    /// `ProvisionError::ConfigLoad` naming the first missing variable; the
    /// failure is logged.
    pub fn resolve(handler: Handler, config: &Config, logger: &dyn Logger) -> ProvisionResult<Self> {
        let settings = match handler {
            Handler::CreateAppUser => ProvisionerSettings::from_config(config).map(Self::CreateAppUser),
            Handler::AppOperations => SmokeTestSettings::from_config(config).map(Self::AppOperations),
        };
        settings.map_err(|e| config_failure(logger, handler, e))
    }
}

pub(crate) fn config_failure(logger: &dyn Logger, handler: Handler, e: ConfigError) -> ProvisionError {
    log_failure(
        logger,
        "failed to load configuration",
        e.into(),
        vec![("handler", json!(handler.name()))],
    )
}
