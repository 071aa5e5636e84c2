//! Credential resolution against a [`SecretStore`].
//!
//! Shared by both handlers: direct lookups by secret id, and tag-based
//! discovery of the RDS-managed master secret.

use serde_json::error::Category;
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use crate::domain::errors::{ProvisionError, ProvisionResult};
use crate::domain::models::{CredentialPair, SecretTag};
use crate::domain::ports::{Level, Logger, SecretStore};

/// Resolves JSON-encoded credential pairs from a secret store.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use rds_bootstrap::domain::ports::SecretStore;
/// use rds_bootstrap::services::SecretResolver;
///
/// async fn example(store: Arc<dyn SecretStore>) {
///     let resolver = SecretResolver::new(store);
///     let pair = resolver.resolve_by_id("app-db-credentials").await.unwrap();
///     assert!(!pair.username.is_empty());
/// }
/// ```
#[derive(Clone)]
pub struct SecretResolver {
    store: Arc<dyn SecretStore>,
}

impl SecretResolver {
    /// Resolver reading from `store`.
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }

    /// Fetches `secret_id` and decodes its payload.
    ///
    /// # Errors
    /// - `SecretFetch` if the store call fails
    /// - `Decode` if the secret has no string payload or the payload is not a
    ///   JSON object with string `username`/`password` fields
    #[instrument(skip(self), err)]
    pub async fn resolve_by_id(&self, secret_id: &str) -> ProvisionResult<CredentialPair> {
        let payload = self
            .store
            .get_secret_string(secret_id)
            .await?
            .ok_or_else(|| ProvisionError::Decode {
                secret_id: secret_id.to_string(),
                reason: "secret has no string value".to_string(),
            })?;

        serde_json::from_str(&payload).map_err(|e| ProvisionError::Decode {
            secret_id: secret_id.to_string(),
            reason: decode_reason(&e),
        })
    }

    /// Finds the first secret carrying `tag` and resolves it by name.
    ///
    /// No match is not an error: an empty pair comes back and the caller's
    /// emptiness check rejects it.
    #[instrument(skip(self, tag, logger), fields(tag = %tag), err)]
    pub async fn resolve_by_tag(
        &self,
        tag: &SecretTag,
        logger: &dyn Logger,
    ) -> ProvisionResult<CredentialPair> {
        let names = self.store.list_secret_names(tag).await?;

        for name in &names {
            logger.log(Level::Info, "found secret", vec![("secret_name", json!(name))]);
        }

        match names.first() {
            Some(first) => self.resolve_by_id(first).await,
            None => Ok(CredentialPair::default()),
        }
    }
}

/// Describes a payload decode failure by category and position only.
///
/// serde_json's own message quotes the offending value, which for a secret
/// payload may be the password.
fn decode_reason(e: &serde_json::Error) -> String {
    let category = match e.classify() {
        Category::Syntax => "malformed JSON",
        Category::Data => "unexpected value shape",
        Category::Eof => "truncated JSON",
        Category::Io => "unreadable payload",
    };
    format!("{category} at line {} column {}", e.line(), e.column())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockSecretStore, RecordingLogger};

    fn resolver(store: MockSecretStore) -> SecretResolver {
        SecretResolver::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_resolve_by_id_decodes_fields() {
        let store = MockSecretStore::new().with_secret("app", r#"{"username":"appu","password":"pw"}"#);
        let pair = resolver(store).resolve_by_id("app").await.unwrap();

        assert_eq!(pair, CredentialPair::new("appu", "pw"));
    }

    #[tokio::test]
    async fn test_resolve_by_id_invalid_json_is_decode_error() {
        let store = MockSecretStore::new().with_secret("app", "not json");
        let err = resolver(store).resolve_by_id("app").await.unwrap_err();

        assert!(matches!(err, ProvisionError::Decode { ref secret_id, .. } if secret_id == "app"));
    }

    #[tokio::test]
    async fn test_decode_error_does_not_quote_secret_values() {
        let store =
            MockSecretStore::new().with_secret("numeric", r#"{"username":"u","password":987654}"#);

        let err = resolver(store).resolve_by_id("numeric").await.unwrap_err();
        let rendered = err.to_string();
        assert!(!rendered.contains("987654"), "{rendered}");
        assert!(rendered.contains("unexpected value shape at line 1 column"));

        let store = MockSecretStore::new().with_secret("bare", r#""s3cr3t-string""#);
        let err = resolver(store).resolve_by_id("bare").await.unwrap_err();
        assert!(matches!(err, ProvisionError::Decode { .. }));
        assert!(!err.to_string().contains("s3cr3t"));
    }

    #[tokio::test]
    async fn test_resolve_by_id_binary_secret_is_decode_error() {
        let store = MockSecretStore::new().with_binary_secret("app");
        let err = resolver(store).resolve_by_id("app").await.unwrap_err();

        assert!(matches!(err, ProvisionError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_resolve_by_id_unknown_secret_is_fetch_error() {
        let err = resolver(MockSecretStore::new())
            .resolve_by_id("missing")
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::SecretFetch { .. }));
    }

    #[tokio::test]
    async fn test_resolve_by_tag_without_match_returns_empty_pair() {
        let logger = RecordingLogger::new();
        let tag = SecretTag::new("k", "v");

        let pair = resolver(MockSecretStore::new())
            .resolve_by_tag(&tag, &logger)
            .await
            .unwrap();

        assert!(pair.is_empty());
        assert!(logger.messages().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_by_tag_uses_first_match_and_logs_each_candidate() {
        let tag = SecretTag::new("k", "v");
        let store = MockSecretStore::new()
            .with_tagged_secret(&tag, "first", r#"{"username":"one","password":"1"}"#)
            .with_tagged_secret(&tag, "second", r#"{"username":"two","password":"2"}"#);
        let fetched = store.fetch_log();
        let logger = RecordingLogger::new();

        let pair = resolver(store).resolve_by_tag(&tag, &logger).await.unwrap();

        assert_eq!(pair, CredentialPair::new("one", "1"));
        assert_eq!(*fetched.lock().unwrap(), vec!["first".to_string()]);
        assert_eq!(logger.messages(), vec!["found secret", "found secret"]);
    }
}
