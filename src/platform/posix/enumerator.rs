use crate::error::{FsError, FsResult};
use crate::platform::traits::Enumerator;
use libc::{DIR, closedir, dirent, opendir, readdir};
use std::ffi::{CStr, CString, OsStr};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;
use tracing::debug;

/// `opendir`/`readdir` enumeration.
#[derive(Debug)]
pub struct PosixEnumerator {
    dir: *mut DIR,
    // Owned by `dir`, overwritten by the next readdir.
    entry: *const dirent,
}

impl Enumerator for PosixEnumerator {
    fn open(path: &Path) -> FsResult<Self> {
        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| FsError::InvalidArgument("directory path contains a NUL byte"))?;

        let dir = unsafe { opendir(c_path.as_ptr()) };
        if dir.is_null() {
            return Err(FsError::open(path, &io::Error::last_os_error()));
        }

        let mut enumerator = Self {
            dir,
            entry: ptr::null(),
        };

        // An empty first read with errno still 0 is a legitimately empty directory.
        if let Err(e) = enumerator.next_entry() {
            enumerator.release();
            return Err(FsError::read(path, &e));
        }

        Ok(enumerator)
    }

    fn next_entry(&mut self) -> io::Result<bool> {
        if self.dir.is_null() {
            return Ok(false);
        }

        // readdir signals errors only through errno, and NULL also means end of stream.
        clear_errno();
        let entry = unsafe { readdir(self.dir) };
        if entry.is_null() {
            self.entry = ptr::null();
            let err = io::Error::last_os_error();
            return match err.raw_os_error() {
                None | Some(0) => Ok(false),
                Some(_) => Err(err),
            };
        }

        self.entry = entry;
        Ok(true)
    }

    fn entry_name(&self) -> Option<&OsStr> {
        if self.entry.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr((*self.entry).d_name.as_ptr()) };
        Some(OsStr::from_bytes(name.to_bytes()))
    }

    fn release(&mut self) {
        self.entry = ptr::null();
        if self.dir.is_null() {
            return;
        }
        if unsafe { closedir(self.dir) } != 0 {
            debug!("closedir failed: {}", io::Error::last_os_error());
        }
        self.dir = ptr::null_mut();
    }
}

impl Drop for PosixEnumerator {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(any(target_os = "linux", target_os = "emscripten", target_os = "hurd"))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::__errno_location() }
}

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "tvos",
    target_os = "watchos",
    target_os = "freebsd",
    target_os = "dragonfly"
))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::__error() }
}

#[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::__errno() }
}

#[cfg(any(target_os = "solaris", target_os = "illumos"))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::___errno() }
}

fn clear_errno() {
    unsafe { *errno_location() = 0 };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn drain(enumerator: &mut PosixEnumerator) -> Vec<String> {
        let mut names = Vec::new();
        while let Some(name) = enumerator.entry_name() {
            names.push(name.to_string_lossy().into_owned());
            if !enumerator.next_entry().unwrap() {
                break;
            }
        }
        names.sort();
        names
    }

    #[test]
    fn test_open_produces_first_entry() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();

        let mut enumerator = PosixEnumerator::open(dir.path()).unwrap();
        assert!(enumerator.entry_name().is_some());

        assert_eq!(drain(&mut enumerator), vec![".", "..", "a.txt"]);
    }

    #[test]
    fn test_open_missing_directory_reports_errno() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        match PosixEnumerator::open(&missing) {
            Err(FsError::Open { code, .. }) => assert_eq!(code, libc::ENOENT),
            other => panic!("expected open error, got {:?}", other),
        }
    }

    #[test]
    fn test_open_regular_file_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, b"x").unwrap();

        match PosixEnumerator::open(&file) {
            Err(FsError::Open { code, .. }) => assert_eq!(code, libc::ENOTDIR),
            other => panic!("expected open error, got {:?}", other),
        }
    }

    #[test]
    fn test_release_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut enumerator = PosixEnumerator::open(dir.path()).unwrap();

        enumerator.release();
        enumerator.release();

        assert!(enumerator.entry_name().is_none());
        assert!(!enumerator.next_entry().unwrap());
    }
}
