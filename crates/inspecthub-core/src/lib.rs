//! # inspecthub-core
//!
//! Core crate for InspectHub. Contains configuration schemas, typed
//! identifiers, the collaborator traits (clock, image storage), and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other InspectHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
