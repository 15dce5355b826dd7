use crate::platform::HomeDir;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Native path delimiter
#[cfg(windows)]
pub const PATH_DELIMITER: &str = "\\";

/// Native path delimiter
#[cfg(not(windows))]
pub const PATH_DELIMITER: &str = "/";

/// Concatenate `left`, the native delimiter and `right`.
///
/// Unlike [`std::path::Path::join`], an absolute `right` does not replace
/// `left`, and no separator deduplication happens.
pub fn join(left: impl AsRef<OsStr>, right: impl AsRef<OsStr>) -> PathBuf {
    let (left, right) = (left.as_ref(), right.as_ref());
    let mut joined = OsString::with_capacity(left.len() + PATH_DELIMITER.len() + right.len());
    joined.push(left);
    joined.push(PATH_DELIMITER);
    joined.push(right);
    PathBuf::from(joined)
}

/// Replace every forward slash with the native delimiter.
pub fn to_native(path: &str) -> String {
    path.replace('/', PATH_DELIMITER)
}

/// Substitute the home directory for a leading `~`.
///
/// Paths without the prefix come back unchanged. Returns `None` when the
/// prefix is present but the home directory cannot be resolved.
pub fn expand_user(path: &str, home: &dyn HomeDir) -> Option<String> {
    let Some(rest) = path.strip_prefix('~') else {
        return Some(path.to_string());
    };

    let home = home.home_dir()?.into_os_string().into_string().ok()?;
    let mut expanded = String::with_capacity(home.len() + rest.len());
    expanded.push_str(&home);
    expanded.push_str(rest);
    Some(expanded)
}

/// Current working directory, provided it fits in `capacity` bytes
/// including a terminating NUL.
pub fn get_cwd(capacity: usize) -> Option<PathBuf> {
    if capacity == 0 {
        return None;
    }

    let cwd = std::env::current_dir().ok()?;
    if cwd.as_os_str().len() >= capacity {
        return None;
    }
    Some(cwd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FixedHome;

    #[test]
    fn test_join_uses_native_delimiter() {
        let joined = join("a", "b");

        #[cfg(windows)]
        assert_eq!(joined, PathBuf::from("a\\b"));
        #[cfg(not(windows))]
        assert_eq!(joined, PathBuf::from("a/b"));
    }

    #[test]
    fn test_join_keeps_absolute_right_side() {
        let joined = join("dir", "/abs");
        assert_eq!(joined.as_os_str().len(), "dir".len() + 1 + "/abs".len());
    }

    #[test]
    fn test_to_native_is_idempotent() {
        let once = to_native("a/b/c");
        assert_eq!(to_native(&once), once);
        assert_eq!(once, ["a", "b", "c"].join(PATH_DELIMITER));
    }

    #[test]
    fn test_expand_user_with_home() {
        let home = FixedHome::new("/home/tester");
        assert_eq!(expand_user("~/x", &home).as_deref(), Some("/home/tester/x"));
        assert_eq!(expand_user("~", &home).as_deref(), Some("/home/tester"));
    }

    #[test]
    fn test_expand_user_without_prefix_is_copy() {
        let home = FixedHome::unresolved();
        assert_eq!(expand_user("/abs/x", &home).as_deref(), Some("/abs/x"));
    }

    #[test]
    fn test_expand_user_unresolved_home() {
        let home = FixedHome::unresolved();
        assert_eq!(expand_user("~/x", &home), None);
    }

    #[test]
    fn test_get_cwd_respects_capacity() {
        assert!(get_cwd(0).is_none());
        assert!(get_cwd(1).is_none());

        let cwd = get_cwd(4096).unwrap();
        assert_eq!(cwd, std::env::current_dir().unwrap());
        assert!(get_cwd(cwd.as_os_str().len()).is_none());
        assert!(get_cwd(cwd.as_os_str().len() + 1).is_some());
    }
}
