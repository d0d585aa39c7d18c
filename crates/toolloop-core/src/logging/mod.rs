//! Logging abstractions
//!
//! Components take an `Arc<dyn Logger>` so the host decides where lines go:
//! nowhere, the console, a `tracing` subscriber, or an in-memory buffer.

mod traits;
mod noop;
mod console;
mod memory;
mod tracing_logger;

pub use traits::{Level, Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::{LogLine, MemoryLogger};
pub use tracing_logger::TracingLogger;
