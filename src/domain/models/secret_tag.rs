//! Tag filters for secret discovery.

use std::fmt;

/// Tag key RDS attaches to the master-user secret it manages.
pub const PRIMARY_DB_INSTANCE_ARN_TAG: &str = "aws:rds:primaryDBInstanceArn";

/// A single tag key/value filter used to discover a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretTag {
    /// Tag key.
    pub key: String,
    /// Exact tag value to match.
    pub value: String,
}

impl SecretTag {
    /// Filter on an arbitrary tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Tag that identifies the master secret of an RDS instance.
    pub fn for_db_instance(region: &str, account: &str, db_id: &str) -> Self {
        Self::new(
            PRIMARY_DB_INSTANCE_ARN_TAG,
            format!("arn:aws:rds:{region}:{account}:db:{db_id}"),
        )
    }
}

impl fmt::Display for SecretTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
