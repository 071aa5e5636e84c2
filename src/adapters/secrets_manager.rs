//! AWS Secrets Manager adapter for the [`SecretStore`] port.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::types::{Filter, FilterNameStringType};
use aws_sdk_secretsmanager::Client;
use tracing::{debug, instrument};

use crate::domain::errors::{ProvisionError, ProvisionResult};
use crate::domain::models::SecretTag;
use crate::domain::ports::SecretStore;

/// Secret store backed by a Secrets Manager client.
#[derive(Clone, Debug)]
pub struct SecretsManagerStore {
    client: Client,
}

impl SecretsManagerStore {
    /// Store over an already configured client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the ambient AWS configuration (region,
    /// credentials, endpoint) of the Lambda environment.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }

    fn tag_filters(tag: &SecretTag) -> [Filter; 2] {
        [
            Filter::builder()
                .key(FilterNameStringType::TagKey)
                .values(&tag.key)
                .build(),
            Filter::builder()
                .key(FilterNameStringType::TagValue)
                .values(&tag.value)
                .build(),
        ]
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    #[instrument(skip(self), err)]
    async fn get_secret_string(&self, secret_id: &str) -> ProvisionResult<Option<String>> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| ProvisionError::SecretFetch {
                secret_id: secret_id.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(response.secret_string().map(str::to_string))
    }

    #[instrument(skip(self, tag), fields(tag = %tag), err)]
    async fn list_secret_names(&self, tag: &SecretTag) -> ProvisionResult<Vec<String>> {
        let [key_filter, value_filter] = Self::tag_filters(tag);
        let response = self
            .client
            .list_secrets()
            .filters(key_filter)
            .filters(value_filter)
            .send()
            .await
            .map_err(|e| ProvisionError::SecretFetch {
                secret_id: tag.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        let names: Vec<String> = response
            .secret_list()
            .iter()
            .filter_map(|entry| entry.name().map(str::to_string))
            .collect();
        debug!(count = names.len(), "listed secrets by tag");
        Ok(names)
    }
}
