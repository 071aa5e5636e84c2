//! Lambda function that provisions the application database.
//!
//! Reads `AWS_REGION`, `AWS_ACCOUNT`, `DB_ID`, `DB_HOST`, `DB_NAME`,
//! `DB_ADMIN_SECRET_KEY` and `DB_APP_SECRET_KEY`. The invocation payload is
//! ignored.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use rds_bootstrap::application::{handle, load_log_config, Handler};
use rds_bootstrap::infrastructure::logging::LoggerImpl;

async fn create_app_user(event: LambdaEvent<Value>) -> Result<String, Error> {
    Ok(handle(Handler::CreateAppUser, &event.context.request_id).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let (log_config, config_error) = load_log_config();
    LoggerImpl::init(&log_config)?;
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "using default logging configuration");
    }

    lambda_runtime::run(service_fn(create_app_user)).await
}
