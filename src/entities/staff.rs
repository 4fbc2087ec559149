//! Staff entity - a member of the outreach team.

use serde::{Deserialize, Serialize};

/// Staff identifier
pub type StaffId = u64;

/// Staff record. Created by the identity side; read-only to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    /// Unique identifier
    pub id: StaffId,
    /// Display name
    pub name: String,
    /// Inactive staff never receive new assignments
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl Staff {
    /// Creates an active staff member.
    #[must_use]
    pub fn new(id: StaffId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_active: true,
        }
    }
}
