//! Inspection domain entities and lifecycle.

pub mod model;
pub mod status;
pub mod transition;

pub use model::{CreateInspection, Inspection, InspectionQuery, InspectionScope};
pub use status::{AnalysisStatus, InspectionStatus};
