use crate::core::metadata::is_directory;
use crate::core::path::join;
use crate::error::{FsError, FsResult};
use crate::platform::traits::Enumerator;
use std::ffi::{OsStr, OsString};
use std::io;
use std::os::windows::ffi::{OsStrExt, OsStringExt};
use std::path::Path;
use tracing::debug;
use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_NO_MORE_FILES, HANDLE};
use windows::Win32::Storage::FileSystem::{
    FindClose, FindFirstFileW, FindNextFileW, WIN32_FIND_DATAW,
};
use windows::core::PCWSTR;

/// `FindFirstFileW`/`FindNextFileW` enumeration.
pub struct WindowsEnumerator {
    handle: Option<HANDLE>,
    data: WIN32_FIND_DATAW,
    name: Option<OsString>,
}

/// Win32 error code carried inside an HRESULT_FROM_WIN32 value.
fn win32_code(err: &windows::core::Error) -> i32 {
    err.code().0 & 0xFFFF
}

impl WindowsEnumerator {
    fn load_name(&mut self) {
        let raw = &self.data.cFileName;
        let len = raw.iter().position(|&c| c == 0).unwrap_or(raw.len());
        self.name = Some(OsString::from_wide(&raw[..len]));
    }
}

impl Enumerator for WindowsEnumerator {
    fn open(path: &Path) -> FsResult<Self> {
        let pattern = join(path, "*");
        let pattern_wide: Vec<u16> = pattern
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();

        let mut enumerator = Self {
            handle: None,
            data: WIN32_FIND_DATAW::default(),
            name: None,
        };

        match unsafe { FindFirstFileW(PCWSTR(pattern_wide.as_ptr()), &mut enumerator.data) } {
            Ok(handle) => {
                enumerator.handle = Some(handle);
                enumerator.load_name();
                Ok(enumerator)
            }
            // Nothing matched the pattern, which is fine for an existing directory.
            Err(e) if e.code() == ERROR_FILE_NOT_FOUND.to_hresult() && is_directory(path) => {
                debug!("No entries in {}", path.display());
                Ok(enumerator)
            }
            Err(e) => Err(FsError::Open {
                path: path.to_path_buf(),
                code: win32_code(&e),
            }),
        }
    }

    fn next_entry(&mut self) -> io::Result<bool> {
        let Some(handle) = self.handle else {
            return Ok(false);
        };

        match unsafe { FindNextFileW(handle, &mut self.data) } {
            Ok(()) => {
                self.load_name();
                Ok(true)
            }
            Err(e) => {
                self.release();
                if e.code() == ERROR_NO_MORE_FILES.to_hresult() {
                    Ok(false)
                } else {
                    Err(io::Error::from_raw_os_error(win32_code(&e)))
                }
            }
        }
    }

    fn entry_name(&self) -> Option<&OsStr> {
        self.name.as_deref()
    }

    fn release(&mut self) {
        self.name = None;
        if let Some(handle) = self.handle.take() {
            if let Err(e) = unsafe { FindClose(handle) } {
                debug!("FindClose failed: {}", e);
            }
        }
    }
}

impl Drop for WindowsEnumerator {
    fn drop(&mut self) {
        self.release();
    }
}
