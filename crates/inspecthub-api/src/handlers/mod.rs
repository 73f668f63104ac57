//! Request handlers, one module per resource.

pub mod auth;
pub mod files;
pub mod health;
pub mod inspection;
pub mod report;
