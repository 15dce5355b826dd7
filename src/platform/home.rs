use crate::platform::traits::HomeDir;
use std::path::PathBuf;

/// Home directory from the process environment (`HOME`, or `USERPROFILE` on Windows).
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvHome;

impl HomeDir for EnvHome {
    fn home_dir(&self) -> Option<PathBuf> {
        env_home::env_home_dir().filter(|home| !home.as_os_str().is_empty())
    }
}

/// Home directory pinned to a fixed value, or deliberately unresolvable.
#[derive(Debug, Default, Clone)]
pub struct FixedHome(pub Option<PathBuf>);

impl FixedHome {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self(Some(home.into()))
    }

    pub fn unresolved() -> Self {
        Self(None)
    }
}

impl HomeDir for FixedHome {
    fn home_dir(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_home() {
        assert_eq!(FixedHome::new("/home/me").home_dir(), Some(PathBuf::from("/home/me")));
        assert_eq!(FixedHome::unresolved().home_dir(), None);
    }
}
