pub mod dir_iter;
pub mod dir_size;
pub mod metadata;
pub mod mkdir;
pub mod path;

pub use dir_iter::{DirIter, Names};
pub use dir_size::calculate_directory_size;
pub use metadata::{
    exists, file_size, is_directory, is_file, is_readable, is_readable_and_writable, is_writable,
};
pub use mkdir::mkdir;
pub use path::{expand_user, get_cwd, join, to_native, PATH_DELIMITER};
