//! Student entity - one row of the uploaded roster plus its outreach state.
//!
//! Field names serialize in camelCase so stored rosters keep the
//! `assignedStaff` / `isSpecial` / `uploadDate` layout.

use super::{ContactStatus, StaffId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Student identifier, unique and immutable once assigned.
pub type StudentId = u64;

/// Student record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique identifier
    pub id: StudentId,
    /// Full name as uploaded
    pub name: String,
    /// Contact phone number
    pub phone: String,
    /// Entrance exam rank
    pub rank: u32,
    /// Reservation category code (e.g. "OC", "BC-A")
    pub category: String,
    /// Staff member who owns the outreach for this student, if any
    #[serde(default)]
    pub assigned_staff: Option<StaffId>,
    /// Latest contact outcome
    pub status: ContactStatus,
    /// Priority flag; special students only go to top performers
    #[serde(default)]
    pub is_special: bool,
    /// Day the student was uploaded
    pub upload_date: NaiveDate,
}

impl Student {
    /// Whether no staff member owns this student yet.
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        self.assigned_staff.is_none()
    }
}

/// The fields an upload is allowed to supply.
///
/// Lifecycle fields (id, owner, status, special flag, upload date) are decided
/// by the repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    /// Full name
    pub name: String,
    /// Contact phone number
    pub phone: String,
    /// Entrance exam rank
    pub rank: u32,
    /// Reservation category code
    pub category: String,
}

/// Partial update for a student. `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    /// New name
    pub name: Option<String>,
    /// New phone
    pub phone: Option<String>,
    /// New rank
    pub rank: Option<u32>,
    /// New category
    pub category: Option<String>,
    /// New owner; `Some(None)` clears the assignment
    pub assigned_staff: Option<Option<StaffId>>,
    /// New status
    pub status: Option<ContactStatus>,
    /// New special flag
    pub is_special: Option<bool>,
}

impl StudentUpdate {
    /// Update that only changes the status.
    #[must_use]
    pub fn status(status: ContactStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Update that only changes the owning staff member.
    #[must_use]
    pub fn assigned_to(staff_id: StaffId) -> Self {
        Self {
            assigned_staff: Some(Some(staff_id)),
            ..Self::default()
        }
    }

    /// Update that only changes the special flag.
    #[must_use]
    pub fn special(is_special: bool) -> Self {
        Self {
            is_special: Some(is_special),
            ..Self::default()
        }
    }

    /// Produces the updated copy of `student`. The id is never touched.
    #[must_use]
    pub fn apply(&self, student: &Student) -> Student {
        Student {
            id: student.id,
            name: self.name.clone().unwrap_or_else(|| student.name.clone()),
            phone: self.phone.clone().unwrap_or_else(|| student.phone.clone()),
            rank: self.rank.unwrap_or(student.rank),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| student.category.clone()),
            assigned_staff: self.assigned_staff.unwrap_or(student.assigned_staff),
            status: self.status.unwrap_or(student.status),
            is_special: self.is_special.unwrap_or(student.is_special),
            upload_date: student.upload_date,
        }
    }
}
