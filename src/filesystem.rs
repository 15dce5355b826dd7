//! Sentinel-returning facade over the filesystem primitives.
//!
//! [`Filesystem`] owns the collaborators the primitives report through: an
//! [`ErrorRecorder`] for failures, a [`DiagnosticSink`] for non-fatal
//! warnings and a [`HomeDir`] resolver. Its operations never fail loudly;
//! they return `None`, `false` or `0` and leave the details in the recorder.

use crate::config::CliConfig;
use crate::core::{self, DirIter};
use crate::error::FsError;
use crate::observability::{DiagnosticSink, ErrorRecorder, ErrorState, LogSink, StderrSink};
use crate::platform::{EnvHome, FixedHome, HomeDir};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone)]
pub struct Filesystem {
    recorder: Arc<dyn ErrorRecorder>,
    diagnostics: Arc<dyn DiagnosticSink>,
    home: Arc<dyn HomeDir>,
}

impl Default for Filesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem {
    /// Process defaults: in-memory error state, stderr diagnostics, environment home.
    pub fn new() -> Self {
        Self {
            recorder: Arc::new(ErrorState::new()),
            diagnostics: Arc::new(StderrSink),
            home: Arc::new(EnvHome),
        }
    }

    pub fn from_config(config: &CliConfig) -> Self {
        let mut fs = Self::new();
        if let Some(home) = &config.home_override {
            fs = fs.with_home(Arc::new(FixedHome::new(home.clone())));
        }
        if config.quiet_diagnostics {
            fs = fs.with_diagnostics(Arc::new(LogSink));
        }
        fs
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn ErrorRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_home(mut self, home: Arc<dyn HomeDir>) -> Self {
        self.home = home;
        self
    }

    pub fn recorder(&self) -> &dyn ErrorRecorder {
        self.recorder.as_ref()
    }

    fn record(&self, err: &FsError) {
        self.recorder.set_error(err.to_string());
    }

    /// Start iterating `path`; `None` on failure with the reason recorded.
    pub fn dir_iter_start(&self, path: impl AsRef<Path>) -> Option<DirIter> {
        DirIter::start(path)
            .inspect_err(|e| self.record(e))
            .ok()
    }

    /// Advance `iter`. A read error returns `false` like exhaustion does,
    /// but is also recorded.
    pub fn dir_iter_next(&self, iter: &mut DirIter) -> bool {
        if iter.advance() {
            return true;
        }
        if let Some(e) = iter.take_error() {
            self.record(&e);
        }
        false
    }

    /// Release an iterator. Accepts `None` so failed starts can be ended too.
    pub fn dir_iter_end(&self, iter: Option<DirIter>) {
        if let Some(iter) = iter {
            iter.end();
        }
    }

    pub fn get_cwd(&self, capacity: usize) -> Option<PathBuf> {
        core::get_cwd(capacity)
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        core::exists(path)
    }

    pub fn is_directory(&self, path: impl AsRef<Path>) -> bool {
        core::is_directory(path)
    }

    pub fn is_file(&self, path: impl AsRef<Path>) -> bool {
        core::is_file(path)
    }

    pub fn is_readable(&self, path: impl AsRef<Path>) -> bool {
        core::is_readable(path)
    }

    pub fn is_writable(&self, path: impl AsRef<Path>) -> bool {
        core::is_writable(path)
    }

    pub fn is_readable_and_writable(&self, path: impl AsRef<Path>) -> bool {
        core::is_readable_and_writable(path)
    }

    pub fn file_size(&self, path: impl AsRef<Path>) -> u64 {
        core::file_size(path, self.diagnostics.as_ref())
    }

    pub fn join_path(&self, left: impl AsRef<OsStr>, right: impl AsRef<OsStr>) -> PathBuf {
        core::join(left, right)
    }

    pub fn to_native_path(&self, path: &str) -> String {
        core::to_native(path)
    }

    pub fn expand_user(&self, path: &str) -> Option<String> {
        core::expand_user(path, self.home.as_ref())
    }

    pub fn mkdir(&self, abs_path: impl AsRef<Path>) -> bool {
        core::mkdir(abs_path)
    }

    /// Non-recursive size of `path`; 0 if it is not a directory or cannot be opened.
    pub fn calculate_directory_size(&self, path: impl AsRef<Path>) -> u64 {
        core::calculate_directory_size(path, self.diagnostics.as_ref())
            .inspect_err(|e| self.record(e))
            .unwrap_or(0)
    }
}
