//! # inspecthub-entity
//!
//! Domain entity models for InspectHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.
//!
//! The inspection lifecycle rules live next to the model in
//! [`inspection::transition`] as pure functions over `&mut Inspection`, so
//! every store applies exactly the same state machine.

pub mod inspection;
pub mod report;
pub mod user;
