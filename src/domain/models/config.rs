//! Ambient configuration model.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::infrastructure::config::ConfigError;

/// Ambient configuration shared by both handlers.
///
/// Field names match the lowercased environment variables the Lambda
/// functions are deployed with (`DB_HOST` -> `db_host`). Values are only
/// checked for presence by the handler that needs them, see [`Config::require`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// AWS region of the RDS instance
    #[serde(default, deserialize_with = "lenient_string")]
    pub aws_region: Option<String>,

    /// AWS account that owns the RDS instance
    #[serde(default, deserialize_with = "lenient_string")]
    pub aws_account: Option<String>,

    /// RDS instance identifier
    #[serde(default, deserialize_with = "lenient_string")]
    pub db_id: Option<String>,

    /// Database endpoint, `host`, `host:port` or `[ipv6]:port`
    #[serde(default, deserialize_with = "lenient_string")]
    pub db_host: Option<String>,

    /// Schema created by the provisioner and used by the smoke test
    #[serde(default, deserialize_with = "lenient_string")]
    pub db_name: Option<String>,

    /// Secret id holding the admin user's credential
    #[serde(default, deserialize_with = "lenient_string")]
    pub db_admin_secret_key: Option<String>,

    /// Secret id holding the application user's credential
    #[serde(default, deserialize_with = "lenient_string")]
    pub db_app_secret_key: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Accepts a string, number or boolean and keeps it as text.
///
/// Account ids and instance names are often all digits, and both YAML and
/// the environment layer hand those over as integers.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientString;

    impl<'de> Visitor<'de> for LenientString {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(LenientString)
}

/// Names of the ambient variables, used for presence errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    /// `AWS_REGION`
    AwsRegion,
    /// `AWS_ACCOUNT`
    AwsAccount,
    /// `DB_ID`
    DbId,
    /// `DB_HOST`
    DbHost,
    /// `DB_NAME`
    DbName,
    /// `DB_ADMIN_SECRET_KEY`
    DbAdminSecretKey,
    /// `DB_APP_SECRET_KEY`
    DbAppSecretKey,
}

impl Setting {
    /// Every ambient variable, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::AwsRegion,
        Self::AwsAccount,
        Self::DbId,
        Self::DbHost,
        Self::DbName,
        Self::DbAdminSecretKey,
        Self::DbAppSecretKey,
    ];

    /// Environment variable the setting is read from.
    pub const fn env_var(&self) -> &'static str {
        match self {
            Self::AwsRegion => "AWS_REGION",
            Self::AwsAccount => "AWS_ACCOUNT",
            Self::DbId => "DB_ID",
            Self::DbHost => "DB_HOST",
            Self::DbName => "DB_NAME",
            Self::DbAdminSecretKey => "DB_ADMIN_SECRET_KEY",
            Self::DbAppSecretKey => "DB_APP_SECRET_KEY",
        }
    }
}

impl Config {
    fn value(&self, setting: Setting) -> Option<&String> {
        match setting {
            Setting::AwsRegion => self.aws_region.as_ref(),
            Setting::AwsAccount => self.aws_account.as_ref(),
            Setting::DbId => self.db_id.as_ref(),
            Setting::DbHost => self.db_host.as_ref(),
            Setting::DbName => self.db_name.as_ref(),
            Setting::DbAdminSecretKey => self.db_admin_secret_key.as_ref(),
            Setting::DbAppSecretKey => self.db_app_secret_key.as_ref(),
        }
    }

    /// Returns the setting's value, or an error naming the missing variable.
    pub fn require(&self, setting: Setting) -> Result<&str, ConfigError> {
        self.value(setting)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingSetting(setting.env_var()))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
