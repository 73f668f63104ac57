//! # inspecthub-storage
//!
//! Image storage provider implementations for InspectHub: the local
//! filesystem (with signed retrieval URLs), S3-compatible object stores
//! (feature `s3`), and a no-op double for tests and development.

pub mod builder;
pub mod providers;

pub use builder::build_storage;
pub use providers::{LocalImageStorage, NoopImageStorage};
