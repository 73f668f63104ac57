//! Report binding: one report per inspection, filed atomically with its
//! completion.

pub mod service;

pub use service::{NewReport, ReportService};
