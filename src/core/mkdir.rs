use crate::core::metadata::is_directory;
use std::fs::DirBuilder;
use std::io;
use std::path::Path;
use tracing::debug;

/// Permission bits for new directories (before umask)
#[cfg(unix)]
const DIRECTORY_MODE: u32 = 0o775;

/// Create a single directory level at `abs_path`.
///
/// Succeeds when the directory was created or already exists as a directory.
/// Missing parents are not created. On POSIX the path must be absolute;
/// Windows paths are not checked for absoluteness.
pub fn mkdir(abs_path: impl AsRef<Path>) -> bool {
    let abs_path = abs_path.as_ref();
    if abs_path.as_os_str().is_empty() {
        return false;
    }

    #[cfg(unix)]
    if !abs_path.is_absolute() {
        debug!("Refusing to create relative path: {}", abs_path.display());
        return false;
    }

    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIRECTORY_MODE);
    }

    match builder.create(abs_path) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => is_directory(abs_path),
        Err(e) => {
            debug!("Failed to create directory {}: {}", abs_path.display(), e);
            false
        }
    }
}
