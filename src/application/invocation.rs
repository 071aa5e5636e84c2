//! Entry point shared by both binaries: one call per Lambda invocation.

use tracing::Instrument;

use super::handlers::{config_failure, Handler, HandlerSettings, Handlers};
use crate::domain::errors::{ProvisionError, ProvisionResult};
use crate::infrastructure::config::{ConfigError, ConfigLoader};
use crate::infrastructure::logging::{LogConfig, TracingLogger};

/// Handles one invocation of `handler`.
///
/// Configuration and clients are built fresh each time; nothing is carried
/// over between invocations.
///
/// # Errors
/// The handler's error, after it has been logged.
pub async fn handle(handler: Handler, request_id: &str) -> ProvisionResult<String> {
    let logger = TracingLogger::new(request_id);
    let span = logger.span().clone();

    async {
        let config = ConfigLoader::load().map_err(|e| {
            config_failure(&logger, handler, ConfigError::LoadFailed(format!("{e:#}")))
        })?;
        let settings = HandlerSettings::resolve(handler, &config, &logger)?;

        Handlers::from_env().await.run(settings, &logger).await
    }
    .instrument(span)
    .await
}

/// Logging settings for the cold-start subscriber.
///
/// Falls back to the defaults when the configuration cannot be loaded; the
/// failure is reported again, with context, by the first invocation.
pub fn load_log_config() -> (LogConfig, Option<ProvisionError>) {
    match ConfigLoader::load() {
        Ok(config) => match LogConfig::try_from(&config.logging) {
            Ok(log_config) => (log_config, None),
            Err(e) => (LogConfig::default(), Some(e.into())),
        },
        Err(e) => (
            LogConfig::default(),
            Some(ConfigError::LoadFailed(format!("{e:#}")).into()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::logging::LogFormat;

    #[test]
    fn test_load_log_config_from_env() {
        temp_env::with_vars(
            [
                ("RDS_BOOTSTRAP_LOGGING__LEVEL", Some("debug")),
                ("RDS_BOOTSTRAP_LOGGING__FORMAT", Some("pretty")),
            ],
            || {
                let (config, err) = load_log_config();
                assert!(err.is_none());
                assert_eq!(config.level, "debug");
                assert_eq!(config.format, LogFormat::Pretty);
            },
        );
    }

    #[test]
    fn test_load_log_config_falls_back_on_invalid_level() {
        temp_env::with_var("RDS_BOOTSTRAP_LOGGING__LEVEL", Some("loud"), || {
            let (config, err) = load_log_config();
            assert_eq!(config.level, "info");
            assert_eq!(config.format, LogFormat::Json);
            assert!(matches!(err, Some(ProvisionError::ConfigLoad(_))));
        });
    }

    #[tokio::test]
    async fn test_handle_reports_missing_settings() {
        let result = temp_env::async_with_vars(
            [
                ("DB_HOST", None::<&str>),
                ("DB_NAME", None),
                ("DB_APP_SECRET_KEY", None),
                ("RDS_BOOTSTRAP_DB_HOST", None),
            ],
            handle(Handler::AppOperations, "req-1"),
        )
        .await;

        assert!(matches!(result, Err(ProvisionError::ConfigLoad(_))));
    }
}
