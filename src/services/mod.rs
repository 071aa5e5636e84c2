//! Service layer: the two handler flows and the pieces they share.
//!
//! - `SecretResolver`: credential lookups by id or tag
//! - `statements`: the only place SQL text is built
//! - `DatabaseProvisioner`: creates the schema, the admin user and the app user
//! - `DatabaseSmokeTest`: inserts and reads back rows as the app user

pub mod provisioner;
pub mod secret_resolver;
pub mod smoke_test;
pub mod statements;

pub use provisioner::{DatabaseProvisioner, ProvisionerSettings, PROVISION_SUCCESS};
pub use secret_resolver::SecretResolver;
pub use smoke_test::{DatabaseSmokeTest, SmokeTestSettings, SMOKE_TEST_SUCCESS};

use serde_json::json;

use crate::domain::errors::ProvisionError;
use crate::domain::ports::{Fields, Level, Logger};

/// Logs `err` at error level with `context` as the message and hands it back,
/// so call sites read `.map_err(|e| log_failure(logger, "...", e, fields))`.
pub(crate) fn log_failure(
    logger: &dyn Logger,
    context: &str,
    err: ProvisionError,
    mut fields: Fields,
) -> ProvisionError {
    fields.push(("error", json!(err.to_string())));
    fields.push(("error_kind", json!(err.kind())));
    logger.log(Level::Error, context, fields);
    err
}
