//! Logging abstractions
//!
//! The resolver reports what it loaded and merged through an injected
//! `Logger`; the default forwards to `tracing`.

mod traits;
mod tracing_logger;
mod memory;

pub use traits::{Logger, SharedLogger, NoOpLogger};
pub use tracing_logger::TracingLogger;
pub use memory::{MemoryLogger, LogLevel};
