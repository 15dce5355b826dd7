pub mod config;
pub mod core;
pub mod error;
pub mod filesystem;
pub mod observability;
pub mod platform;

pub use anyhow::{Context, Result};
pub use error::{FsError, FsResult};
pub use filesystem::Filesystem;
