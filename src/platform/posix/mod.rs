pub mod enumerator;

pub use enumerator::PosixEnumerator;
