//! Feedback log - append-only contact outcomes.
//!
//! Recording feedback also moves the referenced student to the recorded
//! status. The student reference is not enforced: feedback about a deleted
//! student is still appended.

use super::Repository;
use crate::{
    entities::{ContactStatus, Feedback, FeedbackId, StaffId, StudentId, StudentUpdate},
    errors::{Error, Result},
};
use chrono::Utc;
use tracing::{debug, info};

impl Repository {
    /// Records a contact outcome and updates the student's status.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when `remarks` is blank. Nothing is
    /// recorded in that case.
    pub fn add_feedback(
        &mut self,
        student_id: StudentId,
        staff_id: StaffId,
        status: ContactStatus,
        remarks: &str,
    ) -> Result<FeedbackId> {
        let remarks = remarks.trim();
        if remarks.is_empty() {
            return Err(Error::Validation {
                message: "Feedback remarks cannot be empty".to_string(),
            });
        }

        let id = self.append_feedback(student_id, staff_id, status, remarks);
        self.persist();
        info!(
            "Feedback {} recorded for student {} by staff {}: {}",
            id, student_id, staff_id, status
        );
        Ok(id)
    }

    /// Sets a status with the stock remarks for it.
    /// Returns `None` when the student does not exist.
    pub fn quick_update_status(
        &mut self,
        student_id: StudentId,
        staff_id: StaffId,
        status: ContactStatus,
    ) -> Option<FeedbackId> {
        self.student(student_id)?;
        let id = self.append_feedback(student_id, staff_id, status, status.default_remarks());
        self.persist();
        Some(id)
    }

    /// Moves every pending student of `staff_id` to `status`, logging stock
    /// remarks for each. Returns how many students were updated.
    pub fn bulk_update_pending(&mut self, staff_id: StaffId, status: ContactStatus) -> usize {
        let pending: Vec<StudentId> = self
            .students_by_staff(staff_id)
            .into_iter()
            .filter(|s| s.status == ContactStatus::Pending)
            .map(|s| s.id)
            .collect();

        if pending.is_empty() {
            info!("No pending students to update for staff {}", staff_id);
            return 0;
        }

        for &student_id in &pending {
            self.append_feedback(student_id, staff_id, status, status.default_remarks());
        }
        self.persist();
        info!(
            "Bulk updated {} pending students of staff {} to {}",
            pending.len(),
            staff_id,
            status
        );
        pending.len()
    }

    /// Feedback recorded by one staff member, oldest first.
    #[must_use]
    pub fn feedback_by_staff(&self, staff_id: StaffId) -> Vec<&Feedback> {
        self.feedback
            .iter()
            .filter(|f| f.staff_id == staff_id)
            .collect()
    }

    /// Most recent feedback about a student, if any.
    #[must_use]
    pub fn latest_feedback_for(&self, student_id: StudentId) -> Option<&Feedback> {
        self.feedback.iter().rev().find(|f| f.student_id == student_id)
    }

    fn append_feedback(
        &mut self,
        student_id: StudentId,
        staff_id: StaffId,
        status: ContactStatus,
        remarks: &str,
    ) -> FeedbackId {
        let now = Utc::now();
        let id = next_feedback_id(
            u64::try_from(now.timestamp_millis()).unwrap_or(0),
            self.feedback.iter().map(|f| f.id).max(),
        );

        self.feedback.push(Feedback {
            id,
            student_id,
            staff_id,
            status,
            remarks: remarks.to_string(),
            timestamp: now,
        });

        if !self.replace_student(student_id, &StudentUpdate::status(status)) {
            debug!("Feedback {} references unknown student {}", id, student_id);
        }
        id
    }
}

/// Time-derived id that is strictly greater than every id handed out before.
const fn next_feedback_id(now_millis: u64, last: Option<FeedbackId>) -> FeedbackId {
    match last {
        Some(last) if last >= now_millis => last + 1,
        _ => now_millis,
    }
}
