//! Leveled diagnostics collected during a single compile.

use serde::Serialize;

use crate::{debug, log};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// Ordered diagnostic log for one compile run.
///
/// Owned by a single compile call; never shared between runs.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    entries: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and echo it to the logger.
    ///
    /// Errors only go to the debug log: the caller surfaces them as a whole.
    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        let message = message.into();
        match level {
            Level::Warn => log!("warn"; "{}", message),
            _ => debug!("compile"; "{:?}: {}", level, message),
        }
        self.entries.push(Diagnostic { level, message });
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.push(Level::Debug, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Level::Warn, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of diagnostics recorded at `level`.
    pub fn count(&self, level: Level) -> usize {
        self.entries.iter().filter(|d| d.level == level).count()
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.level == Level::Error)
    }

    /// All error messages, each trimmed, newline-joined in emission order.
    ///
    /// `None` when no error was recorded.
    pub fn error_message(&self) -> Option<String> {
        let errors: Vec<&str> = self
            .entries
            .iter()
            .filter(|d| d.level == Level::Error)
            .map(|d| d.message.trim())
            .collect();
        (!errors.is_empty()).then(|| errors.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_errors() {
        let mut sink = DiagnosticSink::new();
        sink.info("parsed");
        sink.debug("bundled 1 source");
        assert!(!sink.has_errors());
        assert_eq!(sink.error_message(), None);
        assert_eq!(sink.entries().len(), 2);
        assert_eq!(sink.count(Level::Info), 1);
        assert_eq!(sink.count(Level::Warn), 0);
    }

    #[test]
    fn test_error_message_keeps_emission_order() {
        let mut sink = DiagnosticSink::new();
        sink.error("  first  \n");
        sink.info("between");
        sink.error("second");
        sink.error("\tthird");
        assert!(sink.has_errors());
        assert_eq!(sink.error_message().unwrap(), "first\nsecond\nthird");
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(Level::Error > Level::Warn);
        assert!(Level::Warn > Level::Info);
        assert!(Level::Info > Level::Debug);
    }
}
