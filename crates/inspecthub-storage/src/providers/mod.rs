//! Image storage provider implementations.

pub mod local;
pub mod noop;
#[cfg(feature = "s3")]
pub mod s3;

pub use local::LocalImageStorage;
pub use noop::NoopImageStorage;
#[cfg(feature = "s3")]
pub use s3::S3ImageStorage;
