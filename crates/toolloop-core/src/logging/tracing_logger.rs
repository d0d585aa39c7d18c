//! Logger that forwards to the `tracing` crate

use super::traits::Logger;

/// Forwards every line to `tracing` under the `toolloop` target
///
/// Nothing is printed unless the host installed a subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "toolloop", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "toolloop", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "toolloop", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "toolloop", "{}", message);
    }
}
