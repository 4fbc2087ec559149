//! User entity - identity records from which the staff directory can be built.
//!
//! Only the fields the engine needs are modelled; credentials live elsewhere.

use super::{Staff, StaffId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role a user holds in the application
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Uploads rosters, assigns students, reads reports
    Admin,
    /// Contacts assigned students and records feedback
    Staff,
}

/// Identity record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, shared with [`Staff::id`] for staff users
    pub id: StaffId,
    /// Display name
    pub name: String,
    /// Login e-mail
    pub email: String,
    /// Role
    pub role: Role,
    /// Deactivated users keep their history but get no new work
    pub is_active: bool,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Staff view of this user.
    #[must_use]
    pub fn to_staff(&self) -> Staff {
        Staff {
            id: self.id,
            name: self.name.clone(),
            is_active: self.is_active,
        }
    }
}
