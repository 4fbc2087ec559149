//! Feedback entity - one entry in the append-only contact log.

use super::{ContactStatus, StaffId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feedback identifier, derived from the creation time in milliseconds.
pub type FeedbackId = u64;

/// Feedback record. Never edited or removed once appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Unique, strictly increasing identifier
    pub id: FeedbackId,
    /// Student the contact was about (not enforced)
    pub student_id: StudentId,
    /// Staff member who made the contact (not enforced)
    pub staff_id: StaffId,
    /// Outcome recorded
    pub status: ContactStatus,
    /// Free-text note, never blank
    pub remarks: String,
    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
}
