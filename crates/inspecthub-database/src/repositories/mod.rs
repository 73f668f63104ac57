//! PostgreSQL implementations of the store traits.

pub mod inspection;
pub mod report;
pub mod user;

pub use inspection::InspectionRepository;
pub use report::ReportRepository;
pub use user::UserRepository;

/// Whether a sqlx error is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
