use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by directory iteration and the other filesystem primitives.
///
/// The `Display` text of `Open` and `Read` is what ends up in the error
/// recorder, so it carries the path and the raw OS error code.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Can't open directory {}. Error code: {code}", .path.display())]
    Open { path: PathBuf, code: i32 },

    #[error("Can't iterate directory {}. Error code: {code}", .path.display())]
    Read { path: PathBuf, code: i32 },

    #[error("OS error: {0}")]
    Io(#[from] io::Error),
}

impl FsError {
    pub(crate) fn open(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        Self::Open {
            path: path.into(),
            code: err.raw_os_error().unwrap_or(0),
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        Self::Read {
            path: path.into(),
            code: err.raw_os_error().unwrap_or(0),
        }
    }

    /// Raw OS error code, if this error came from the OS.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Open { code, .. } | Self::Read { code, .. } => Some(*code),
            Self::Io(e) => e.raw_os_error(),
            Self::InvalidArgument(_) => None,
        }
    }
}

pub type FsResult<T> = std::result::Result<T, FsError>;
