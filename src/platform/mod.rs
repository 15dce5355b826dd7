pub mod home;
pub mod traits;

#[cfg(unix)]
pub mod posix;

#[cfg(windows)]
pub mod windows;

pub use home::{EnvHome, FixedHome};
pub use traits::{Enumerator, HomeDir};

#[cfg(unix)]
pub use posix::PosixEnumerator;

#[cfg(windows)]
pub use windows::WindowsEnumerator;

/// Enumeration protocol of the platform this crate was built for.
#[cfg(unix)]
pub type NativeEnumerator = PosixEnumerator;

#[cfg(windows)]
pub type NativeEnumerator = WindowsEnumerator;
