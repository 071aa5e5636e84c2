//! Common test utilities for integration tests
//!
//! Fixtures wiring the provisioner and smoke test to the in-memory adapters.

#![allow(dead_code)]

use std::sync::Arc;

use rds_bootstrap::adapters::mock::{MockDatabase, MockSecretStore};
use rds_bootstrap::domain::models::SecretTag;
use rds_bootstrap::services::{
    DatabaseProvisioner, DatabaseSmokeTest, ProvisionerSettings, SecretResolver, SmokeTestSettings,
};

pub const MASTER_SECRET: &str = r#"{"username":"master","password":"m4ster"}"#;
pub const ADMIN_SECRET: &str = r#"{"username":"adminu","password":"p1"}"#;
pub const APP_SECRET: &str = r#"{"username":"appu","password":"p2"}"#;

pub fn master_tag() -> SecretTag {
    SecretTag::for_db_instance("us-east-1", "111122223333", "appdb-instance")
}

pub fn provisioner_settings() -> ProvisionerSettings {
    ProvisionerSettings {
        master_tag: master_tag(),
        host: "appdb-instance.abc123.us-east-1.rds.amazonaws.com".to_string(),
        database: "appdb".to_string(),
        admin_secret_id: "appdb/admin".to_string(),
        app_secret_id: "appdb/app".to_string(),
    }
}

pub fn smoke_test_settings() -> SmokeTestSettings {
    SmokeTestSettings {
        host: "appdb-instance.abc123.us-east-1.rds.amazonaws.com".to_string(),
        database: "appdb".to_string(),
        app_secret_id: "appdb/app".to_string(),
    }
}

/// A store holding the master secret under the instance tag plus the admin
/// and app secrets.
pub fn full_store() -> MockSecretStore {
    MockSecretStore::new()
        .with_tagged_secret(&master_tag(), "rds!db-0123", MASTER_SECRET)
        .with_secret("appdb/admin", ADMIN_SECRET)
        .with_secret("appdb/app", APP_SECRET)
}

pub fn provisioner(store: MockSecretStore, db: &MockDatabase) -> DatabaseProvisioner {
    DatabaseProvisioner::new(
        SecretResolver::new(Arc::new(store)),
        Arc::new(db.clone()),
        provisioner_settings(),
    )
}

pub fn smoke_test(store: MockSecretStore, db: &MockDatabase) -> DatabaseSmokeTest {
    DatabaseSmokeTest::new(
        SecretResolver::new(Arc::new(store)),
        Arc::new(db.clone()),
        smoke_test_settings(),
    )
}
