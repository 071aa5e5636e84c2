//! The only place SQL text is assembled.
//!
//! Identifiers and credentials are spliced into the statement text as
//! literals. Call sites receive a [`Statement`] and never format SQL
//! themselves, so switching to bound parameters touches only this module.

use crate::domain::models::{CredentialPair, Statement};

/// Table the smoke test writes to and reads from.
pub const DRAGON_TABLE: &str = "dragon";

/// Names inserted by the smoke test, in insertion order.
pub const DRAGON_NAMES: [&str; 3] = ["Alice", "Bob", "Charlie"];

/// Privileges granted to the application user.
pub const APP_PRIVILEGES: &str = "INSERT, UPDATE, DELETE, SELECT, REFERENCES";

/// `CREATE DATABASE IF NOT EXISTS`.
pub fn create_database(database: &str) -> Statement {
    Statement::new(
        "create database",
        format!("CREATE DATABASE IF NOT EXISTS {database}"),
    )
}

/// `CREATE USER IF NOT EXISTS` reachable from any host. The logged form hides the password.
pub fn create_user(purpose: &'static str, credential: &CredentialPair) -> Statement {
    let user = &credential.username;
    Statement::with_secret(
        purpose,
        format!(
            "CREATE USER IF NOT EXISTS '{user}'@'%' IDENTIFIED BY '{}'",
            credential.password
        ),
        format!("CREATE USER IF NOT EXISTS '{user}'@'%' IDENTIFIED BY '***'"),
    )
}

/// Everything on `database` for the admin user.
pub fn grant_all_privileges(database: &str, username: &str) -> Statement {
    Statement::new(
        "grant admin privileges",
        format!("GRANT ALL PRIVILEGES ON {database}.* TO '{username}'@'%'"),
    )
}

/// [`APP_PRIVILEGES`] on `database` for the app user.
pub fn grant_app_privileges(database: &str, username: &str) -> Statement {
    Statement::new(
        "grant privileges for app user",
        format!("GRANT {APP_PRIVILEGES} ON {database}.* TO '{username}'@'%'"),
    )
}

/// Reload the grant tables.
pub fn flush_privileges() -> Statement {
    Statement::new("flush privileges", "FLUSH PRIVILEGES")
}

/// One multi-row insert of [`DRAGON_NAMES`].
pub fn insert_dragons() -> Statement {
    let values = DRAGON_NAMES
        .iter()
        .map(|name| format!("('{name}')"))
        .collect::<Vec<_>>()
        .join(", ");
    Statement::new(
        "create data",
        format!("INSERT INTO {DRAGON_TABLE} (name) VALUES {values}"),
    )
}

/// Every row of the dragon table.
pub fn select_dragons() -> Statement {
    Statement::new("read data", format!("SELECT * FROM {DRAGON_TABLE}"))
}
