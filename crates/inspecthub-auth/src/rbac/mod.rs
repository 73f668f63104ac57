//! Role-based access control: per-operation role sets and the access guard.

pub mod enforcer;
pub mod policies;

pub use enforcer::{AccessGuard, require};
pub use policies::Operation;
