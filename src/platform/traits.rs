use crate::error::FsResult;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

/// Native directory enumeration protocol.
///
/// Every platform variant couples "open" with "produce the first entry":
/// after a successful `open`, `entry_name` already reports the first entry,
/// or `None` when the directory has none.
pub trait Enumerator: Sized {
    /// Open `path` and read the first entry.
    fn open(path: &Path) -> FsResult<Self>;

    /// Move to the next entry. `Ok(false)` means the enumeration is exhausted.
    fn next_entry(&mut self) -> io::Result<bool>;

    /// Name of the current entry, valid until the next `next_entry` or `release`.
    fn entry_name(&self) -> Option<&OsStr>;

    /// Give the native handle back to the OS. Calling it twice is a no-op.
    fn release(&mut self);
}

/// Resolves the caller's home directory.
pub trait HomeDir: Send + Sync {
    fn home_dir(&self) -> Option<PathBuf>;
}
