//! Customer booking analytics.

pub mod service;

pub use service::{AnalyticsService, CustomerAnalytics};
