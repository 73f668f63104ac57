//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two disjoint capability classes.
///
/// There is no hierarchy: a pilot is neither above nor below a customer.
/// Every authorization site matches on this enum exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Requests inspections and reads their reports.
    Customer,
    /// Claims pending inspections, uploads imagery, and files reports.
    Pilot,
}

impl UserRole {
    /// All roles, in declaration order.
    pub const ALL: [UserRole; 2] = [UserRole::Customer, UserRole::Pilot];

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Pilot => "pilot",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = inspecthub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "pilot" => Ok(Self::Pilot),
            _ => Err(inspecthub_core::AppError::validation(format!(
                "Invalid role: '{s}'. Role must be 'customer' or 'pilot'"
            ))),
        }
    }
}
