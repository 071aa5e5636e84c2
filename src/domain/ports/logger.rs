//! Logger port used by the services.

use serde_json::Value;

/// Severity of a log line, ordered from `Trace` up to `Error`.
///
/// ```
/// use rds_bootstrap::domain::ports::Level;
///
/// assert!(Level::Error > Level::Info);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Finest detail; not emitted by the handlers today
    Trace,
    /// SQL about to run (redacted) and other step-by-step detail
    Debug,
    /// Progress of a handler: tags, secrets found, rows read
    Info,
    /// Recoverable problem, e.g. a failed close
    Warn,
    /// A step that failed; the line carries `error` and `error_kind` fields
    Error,
}

/// Structured key/value context attached to a log line.
pub type Fields = Vec<(&'static str, Value)>;

/// Port trait for structured logging.
///
/// One logger is constructed per invocation and handed to every service
/// call, so each line carries that invocation's request id without any
/// process-wide logger being reconfigured. Tests substitute a recording
/// implementation and assert on what was logged.
///
/// # Examples
///
/// ```
/// use rds_bootstrap::domain::ports::{Level, Logger};
/// use serde_json::json;
///
/// fn example(logger: &dyn Logger) {
///     logger.info("secret tag resolved");
///     logger.log(Level::Error, "failed to create database", vec![("database", json!("appdb"))]);
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log a message with a specific level and structured fields.
    fn log(&self, level: Level, message: &str, fields: Fields);

    /// Log a debug-level message
    fn debug(&self, message: &str) {
        self.log(Level::Debug, message, Vec::new());
    }

    /// Log an info-level message
    fn info(&self, message: &str) {
        self.log(Level::Info, message, Vec::new());
    }

    /// Log a warning-level message
    fn warn(&self, message: &str) {
        self.log(Level::Warn, message, Vec::new());
    }

    /// Log an error-level message
    fn error(&self, message: &str) {
        self.log(Level::Error, message, Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Warn < Level::Error);
    }
}
