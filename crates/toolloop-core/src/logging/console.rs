//! Console logger implementation

use super::traits::{Level, Logger};

/// A logger that writes prefixed lines to the console
///
/// Info goes to stdout, everything else to stderr. Debug lines are dropped
/// unless the logger was built with [`ConsoleLogger::verbose`].
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    verbose: bool,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a console logger with the default `[toolloop]` prefix
    pub fn new() -> Self {
        Self::with_prefix("[toolloop]")
    }

    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            verbose: false,
        }
    }

    /// Also print debug lines
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    fn format(&self, level: Level, message: &str) -> String {
        format!("{} {}: {}", self.prefix, level, message)
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("{}", self.format(Level::Debug, message));
        }
    }

    fn info(&self, message: &str) {
        println!("{}", self.format(Level::Info, message));
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", self.format(Level::Warn, message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", self.format(Level::Error, message));
    }
}
