//! Installs the global subscriber, so everything lives in one test.

use rds_bootstrap::domain::ports::{Level, Logger};
use rds_bootstrap::infrastructure::logging::{LogConfig, LogFormat, LoggerImpl, TracingLogger};
use serde_json::json;

#[test]
fn test_subscriber_installs_once_and_invocation_logger_emits() {
    let config = LogConfig {
        level: "debug".to_string(),
        format: LogFormat::Json,
    };

    assert!(LoggerImpl::init(&config).is_ok());
    assert!(
        LoggerImpl::init(&config).is_err(),
        "a second global subscriber must be rejected"
    );

    let logger = TracingLogger::new("c0ffee-request");
    logger.info("secret tag arn:aws:rds:us-east-1:111122223333:db:appdb-instance");
    logger.log(
        Level::Debug,
        "create admin user",
        vec![("sql", json!("CREATE USER IF NOT EXISTS 'adminu'@'%' IDENTIFIED BY '***'"))],
    );
    logger.error("failed to connect to database");
}

#[test]
fn test_invalid_level_is_rejected_before_install() {
    let config = LogConfig {
        level: "chatty".to_string(),
        format: LogFormat::Pretty,
    };

    assert!(LoggerImpl::init(&config).is_err());
}
