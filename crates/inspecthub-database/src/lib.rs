//! # inspecthub-database
//!
//! Persistence for InspectHub. The services only ever see the store traits
//! in [`store`]; two implementations exist:
//!
//! - [`repositories`]: PostgreSQL via sqlx, one transaction with
//!   `SELECT ... FOR UPDATE` per state change.
//! - [`memory`]: a single async mutex over in-process maps, used by tests and
//!   database-less development runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{InspectionStore, ReportStore, Stores, Transition, UserStore};
