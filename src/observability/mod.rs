pub mod diagnostics;
pub mod logger;

pub use diagnostics::{DiagnosticSink, ErrorRecorder, ErrorState, LogSink, MemorySink, StderrSink};
pub use logger::{init_logging, shutdown_logging, Rotation};
