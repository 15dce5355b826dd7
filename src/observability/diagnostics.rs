use std::io::Write;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Records the most recent error message for later retrieval.
pub trait ErrorRecorder: Send + Sync {
    /// Replace the recorded message.
    fn set_error(&self, message: String);

    /// The recorded message, if any.
    fn error_message(&self) -> Option<String>;

    fn reset_error(&self);

    fn is_error_set(&self) -> bool {
        self.error_message().is_some()
    }
}

/// Writer for non-fatal warnings that bypass the error recorder.
pub trait DiagnosticSink: Send + Sync {
    fn write_diagnostic(&self, message: &str);
}

/// Default recorder holding a single message.
#[derive(Debug, Default)]
pub struct ErrorState {
    message: Mutex<Option<String>>,
}

impl ErrorState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ErrorRecorder for ErrorState {
    fn set_error(&self, message: String) {
        debug!("Recording error: {}", message);
        if let Ok(mut slot) = self.message.lock() {
            if let Some(previous) = slot.as_deref() {
                debug!("Overwriting unread error: {}", previous);
            }
            *slot = Some(message);
        }
    }

    fn error_message(&self) -> Option<String> {
        self.message.lock().ok().and_then(|slot| slot.clone())
    }

    fn reset_error(&self) {
        if let Ok(mut slot) = self.message.lock() {
            *slot = None;
        }
    }
}

/// Writes diagnostics straight to the process stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn write_diagnostic(&self, message: &str) {
        // A failed write to stderr has nowhere left to go.
        let _ = writeln!(std::io::stderr().lock(), "{}", message);
    }
}

/// Routes diagnostics into the `tracing` pipeline at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn write_diagnostic(&self, message: &str) {
        warn!("{}", message);
    }
}

/// Buffers diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }
}

impl DiagnosticSink for MemorySink {
    fn write_diagnostic(&self, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_state_keeps_latest_message() {
        let state = ErrorState::new();
        assert!(!state.is_error_set());

        state.set_error("first".to_string());
        state.set_error("second".to_string());
        assert_eq!(state.error_message().as_deref(), Some("second"));

        state.reset_error();
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_memory_sink_collects_lines() {
        let sink = MemorySink::new();
        sink.write_diagnostic("Path is not a file: /x");
        sink.write_diagnostic("Path is not a directory: /y");

        assert_eq!(
            sink.lines(),
            vec!["Path is not a file: /x", "Path is not a directory: /y"]
        );
    }
}
