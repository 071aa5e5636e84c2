//! Global subscriber setup and the per-invocation logger.

use super::config::{LogConfig, LogFormat};
use super::secret_scrubbing::SecretScrubber;
use crate::domain::ports::{Fields, Level as PortLevel, Logger};
use anyhow::{anyhow, Result};
use std::io;
use tracing::{Level, Span};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Process-wide subscriber, installed once per cold start.
///
/// Writes line-oriented records to stdout, where the Lambda runtime picks
/// them up. Per-invocation context is added by [`TracingLogger`], not here.
pub struct LoggerImpl;

impl LoggerImpl {
    /// Initialize the subscriber with the given configuration
    ///
    /// # Errors
    /// Returns an error if the level is invalid or a global subscriber is
    /// already installed.
    pub fn init(config: &LogConfig) -> Result<Self> {
        let default_level = parse_log_level(&config.level)?;

        let env_filter = EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy();

        let stdout_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stdout)
                .with_ansi(false)
                .with_current_span(true)
                .with_span_list(false)
                .with_target(true)
                .with_filter(env_filter)
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(io::stdout)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(env_filter)
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(stdout_layer)
            .try_init()
            .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

        tracing::debug!(
            level = %config.level,
            format = ?config.format,
            "logger initialized"
        );

        Ok(Self)
    }
}

/// Parse log level string to Level
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}

/// [`Logger`] bound to a single invocation.
///
/// Every line is emitted inside an `invocation` span carrying the trigger's
/// request id, with structured fields rendered as one JSON `context` value.
/// Messages and fields pass through the [`SecretScrubber`] first.
pub struct TracingLogger {
    span: Span,
    scrubber: SecretScrubber,
}

impl TracingLogger {
    /// Logger for the invocation identified by `request_id`.
    pub fn new(request_id: &str) -> Self {
        Self {
            span: tracing::info_span!("invocation", request_id = %request_id),
            scrubber: SecretScrubber::new(),
        }
    }

    /// The invocation span, for instrumenting the handler future.
    pub fn span(&self) -> &Span {
        &self.span
    }

    fn render(&self, fields: Fields) -> Option<String> {
        if fields.is_empty() {
            return None;
        }
        let object: serde_json::Map<String, serde_json::Value> = fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        Some(
            self.scrubber
                .scrub_message(&serde_json::Value::Object(object).to_string()),
        )
    }
}

macro_rules! emit {
    ($level:expr, $message:expr, $context:expr) => {
        match $context {
            Some(context) => tracing::event!($level, context = %context, "{}", $message),
            None => tracing::event!($level, "{}", $message),
        }
    };
}

impl Logger for TracingLogger {
    fn log(&self, level: PortLevel, message: &str, fields: Fields) {
        let _entered = self.span.enter();
        let message = self.scrubber.scrub_message(message);
        let context = self.render(fields);

        match level {
            PortLevel::Trace => emit!(Level::TRACE, message, context),
            PortLevel::Debug => emit!(Level::DEBUG, message, context),
            PortLevel::Info => emit!(Level::INFO, message, context),
            PortLevel::Warn => emit!(Level::WARN, message, context),
            PortLevel::Error => emit!(Level::ERROR, message, context),
        }
    }
}
