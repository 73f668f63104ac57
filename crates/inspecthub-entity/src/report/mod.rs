//! Inspection report entities.

pub mod model;

pub use model::{CreateReport, Report};
