//! Single-probe metadata predicates.
//!
//! Every query performs one `stat`-style probe (symlinks are followed) and
//! folds any failure, missing path or otherwise, into `false`.

use crate::observability::DiagnosticSink;
use std::fs::{self, Metadata};
use std::path::Path;

fn probe(path: &Path) -> Option<Metadata> {
    fs::metadata(path).ok()
}

/// Owner (read, write) permission bits.
#[cfg(unix)]
fn owner_access(metadata: &Metadata) -> (bool, bool) {
    use std::os::unix::fs::PermissionsExt;

    let mode = metadata.permissions().mode();
    (
        mode & libc::S_IRUSR as u32 != 0,
        mode & libc::S_IWUSR as u32 != 0,
    )
}

/// Owner (read, write) permission bits.
#[cfg(windows)]
fn owner_access(metadata: &Metadata) -> (bool, bool) {
    // Windows has no write-only mode, anything that exists is readable.
    (true, !metadata.permissions().readonly())
}

pub fn exists(path: impl AsRef<Path>) -> bool {
    probe(path.as_ref()).is_some()
}

pub fn is_directory(path: impl AsRef<Path>) -> bool {
    probe(path.as_ref()).is_some_and(|m| m.is_dir())
}

pub fn is_file(path: impl AsRef<Path>) -> bool {
    probe(path.as_ref()).is_some_and(|m| m.is_file())
}

pub fn is_readable(path: impl AsRef<Path>) -> bool {
    probe(path.as_ref()).is_some_and(|m| owner_access(&m).0)
}

pub fn is_writable(path: impl AsRef<Path>) -> bool {
    probe(path.as_ref()).is_some_and(|m| owner_access(&m).1)
}

pub fn is_readable_and_writable(path: impl AsRef<Path>) -> bool {
    probe(path.as_ref()).is_some_and(|m| {
        let (read, write) = owner_access(&m);
        read && write
    })
}

/// Byte length of a regular file.
///
/// Anything that is not a regular file yields 0 and a
/// `Path is not a file` diagnostic.
pub fn file_size(path: impl AsRef<Path>, diagnostics: &dyn DiagnosticSink) -> u64 {
    let path = path.as_ref();
    if !is_file(path) {
        diagnostics.write_diagnostic(&format!("Path is not a file: {}", path.display()));
        return 0;
    }
    probe(path).map_or(0, |m| m.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MemorySink;
    use tempfile::tempdir;

    #[test]
    fn test_directory_and_file_are_exclusive() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, b"hello").unwrap();

        assert!(is_directory(dir.path()));
        assert!(!is_file(dir.path()));
        assert!(is_file(&file));
        assert!(!is_directory(&file));
    }

    #[test]
    fn test_missing_path_is_false_everywhere() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        assert!(!exists(&missing));
        assert!(!is_directory(&missing));
        assert!(!is_file(&missing));
        assert!(!is_readable(&missing));
        assert!(!is_writable(&missing));
        assert!(!is_readable_and_writable(&missing));
        assert!(!exists(""));
    }

    #[test]
    fn test_fresh_file_is_readable_and_writable() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("rw");
        fs::write(&file, b"x").unwrap();

        assert!(exists(&file));
        assert!(is_readable(&file));
        assert!(is_writable(&file));
        assert!(is_readable_and_writable(&file));
    }

    #[test]
    fn test_readonly_file_is_not_writable() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("ro");
        fs::write(&file, b"x").unwrap();

        let mut perms = fs::metadata(&file).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&file, perms).unwrap();

        assert!(is_readable(&file));
        assert!(!is_writable(&file));
        assert!(!is_readable_and_writable(&file));

        // Let tempdir cleanup succeed on every platform
        let mut perms = fs::metadata(&file).unwrap().permissions();
        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(false);
        fs::set_permissions(&file, perms).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_write_only_file_is_not_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let file = dir.path().join("wo");
        fs::write(&file, b"x").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o200)).unwrap();

        assert!(!is_readable(&file));
        assert!(is_writable(&file));
        assert!(!is_readable_and_writable(&file));
    }

    #[test]
    fn test_file_size() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("seven");
        fs::write(&file, b"1234567").unwrap();
        let sink = MemorySink::new();

        assert_eq!(file_size(&file, &sink), 7);
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_file_size_of_directory_is_zero_with_diagnostic() {
        let dir = tempdir().unwrap();
        let sink = MemorySink::new();

        assert_eq!(file_size(dir.path(), &sink), 0);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Path is not a file: "));
    }
}
