//! Lambda function that smoke-tests the application database as the app user.
//!
//! Reads `DB_HOST`, `DB_NAME` and `DB_APP_SECRET_KEY`. The invocation payload
//! is ignored.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use rds_bootstrap::application::{handle, load_log_config, Handler};
use rds_bootstrap::infrastructure::logging::LoggerImpl;

async fn app_operations(event: LambdaEvent<Value>) -> Result<String, Error> {
    Ok(handle(Handler::AppOperations, &event.context.request_id).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let (log_config, config_error) = load_log_config();
    LoggerImpl::init(&log_config)?;
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "using default logging configuration");
    }

    lambda_runtime::run(service_fn(app_operations)).await
}
