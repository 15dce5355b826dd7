//! Portable directory iteration.
//!
//! [`DirIter`] drives a platform [`Enumerator`] through one lifecycle:
//!
//! - **open with entry**: the handle is held and [`DirIter::entry_name`]
//!   returns the current name,
//! - **open, exhausted**: the enumeration ended (or failed), the handle was
//!   already given back and there is no current name,
//! - **released**: the iterator was consumed by [`DirIter::end`] or dropped.
//!
//! `start` always performs the first enumeration step, so a freshly started
//! iterator is positioned on the first entry, or already exhausted when the
//! directory has none.

use crate::error::{FsError, FsResult};
use crate::platform::{Enumerator, NativeEnumerator};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

enum IterState<E> {
    Open(E),
    Exhausted,
}

pub struct DirIter<E: Enumerator = NativeEnumerator> {
    path: PathBuf,
    state: IterState<E>,
    last_error: Option<FsError>,
}

impl DirIter {
    /// Open `path` with the native enumeration protocol.
    pub fn start(path: impl AsRef<Path>) -> FsResult<Self> {
        Self::start_with(path)
    }
}

impl<E: Enumerator> DirIter<E> {
    /// Open `path` with an explicit enumeration protocol.
    pub fn start_with(path: impl AsRef<Path>) -> FsResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(FsError::InvalidArgument("directory path is empty"));
        }

        let enumerator = E::open(path)?;
        debug!("Opened directory iterator: {}", path.display());
        Ok(Self::from_enumerator(path.to_path_buf(), enumerator))
    }

    pub(crate) fn from_enumerator(path: PathBuf, enumerator: E) -> Self {
        let mut iter = Self {
            path,
            state: IterState::Open(enumerator),
            last_error: None,
        };

        // Nothing to hand out, so don't hold the handle until `end`
        if iter.entry_name().is_none() {
            iter.finish();
        }
        iter
    }

    /// Directory being enumerated.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the current entry.
    ///
    /// The view borrows the iterator and so cannot outlive the next
    /// [`advance`](Self::advance) or [`end`](Self::end).
    pub fn entry_name(&self) -> Option<&OsStr> {
        match &self.state {
            IterState::Open(enumerator) => enumerator.entry_name(),
            IterState::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, IterState::Exhausted)
    }

    /// Move to the next entry, telling exhaustion (`Ok(false)`) apart from a
    /// read failure (`Err`). Either way the native handle is released as soon
    /// as the enumeration stops.
    pub fn try_advance(&mut self) -> FsResult<bool> {
        let IterState::Open(enumerator) = &mut self.state else {
            return Ok(false);
        };

        match enumerator.next_entry() {
            Ok(true) => Ok(true),
            Ok(false) => {
                self.finish();
                Ok(false)
            }
            Err(e) => {
                self.finish();
                Err(FsError::read(&self.path, &e))
            }
        }
    }

    /// Move to the next entry.
    ///
    /// Returns `false` both at the end of the directory and on a read error;
    /// the error, if any, is kept for [`take_error`](Self::take_error).
    pub fn advance(&mut self) -> bool {
        match self.try_advance() {
            Ok(has_next) => has_next,
            Err(e) => {
                debug!("{}", e);
                self.last_error = Some(e);
                false
            }
        }
    }

    /// Error swallowed by the last failing [`advance`](Self::advance).
    pub fn take_error(&mut self) -> Option<FsError> {
        self.last_error.take()
    }

    /// Release the native handle (if still held) and the iterator itself.
    pub fn end(mut self) {
        self.finish();
    }

    /// Owned entry names, starting with the current one.
    pub fn names(self) -> Names<E> {
        Names {
            iter: self,
            primed: false,
        }
    }

    fn finish(&mut self) {
        if let IterState::Open(mut enumerator) =
            std::mem::replace(&mut self.state, IterState::Exhausted)
        {
            enumerator.release();
            debug!("Released directory handle: {}", self.path.display());
        }
    }
}

impl<E: Enumerator> Drop for DirIter<E> {
    fn drop(&mut self) {
        self.finish();
    }
}

impl<E: Enumerator> fmt::Debug for DirIter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirIter")
            .field("path", &self.path)
            .field("entry_name", &self.entry_name())
            .field("exhausted", &self.is_exhausted())
            .finish()
    }
}

/// Iterator over owned entry names, produced by [`DirIter::names`].
pub struct Names<E: Enumerator = NativeEnumerator> {
    iter: DirIter<E>,
    primed: bool,
}

impl<E: Enumerator> Iterator for Names<E> {
    type Item = FsResult<OsString>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.primed {
            match self.iter.try_advance() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
        self.primed = true;
        self.iter.entry_name().map(|name| Ok(name.to_os_string()))
    }
}
