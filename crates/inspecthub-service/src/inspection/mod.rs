//! The inspection lifecycle manager.

pub mod service;

pub use service::{InspectionService, NewInspection, UploadOutcome};
