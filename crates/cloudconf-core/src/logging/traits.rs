//! Logger trait definition

use std::sync::Arc;

/// Logger abstraction injected into the resolver
///
/// Implementations:
/// - `TracingLogger`: forwards to the `tracing` facade (default)
/// - `NoOpLogger`: silent
/// - `MemoryLogger`: records messages, for tests
pub trait Logger: Send + Sync {
    /// Log a debug message
    fn debug(&self, message: &str);

    /// Log an info message
    fn info(&self, message: &str);

    /// Log a warning message
    fn warn(&self, message: &str);
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

/// A logger that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}
