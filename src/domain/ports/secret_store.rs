//! Secret store port (trait) for dependency injection.
//!
//! Services resolve credentials through this trait; the AWS Secrets Manager
//! adapter and the in-memory mock both implement it.

use async_trait::async_trait;

use crate::domain::errors::ProvisionResult;
use crate::domain::models::SecretTag;

/// Read-only access to stored secrets.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetches the string payload of a secret by exact identifier.
    ///
    /// # Returns
    /// - `Some(String)` with the raw payload
    /// - `None` if the secret exists but holds no string value
    ///
    /// # Errors
    /// Returns `ProvisionError::SecretFetch` if the store call fails.
    async fn get_secret_string(&self, secret_id: &str) -> ProvisionResult<Option<String>>;

    /// Lists the names of secrets carrying `tag`, in store order.
    ///
    /// # Errors
    /// Returns `ProvisionError::SecretFetch` if the store call fails.
    async fn list_secret_names(&self, tag: &SecretTag) -> ProvisionResult<Vec<String>>;
}
