pub mod enumerator;

pub use enumerator::WindowsEnumerator;
