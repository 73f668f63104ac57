//! Registration, login, and profile lookup.

pub mod service;

pub use service::{AccountService, LoginOutcome, Registration};
