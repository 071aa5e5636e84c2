//! Per-invocation wiring of the two Lambda handlers.

pub mod handlers;
pub mod invocation;

pub use handlers::{Handler, HandlerSettings, Handlers};
pub use invocation::{handle, load_log_config};
