//! Repository - owns students, staff and feedback for the session.
//!
//! Records are value types: an update builds a new record and replaces the old
//! one in its collection. Every mutating operation saves through the
//! [`Persistence`] collaborator before returning. A failed save is logged and
//! swallowed, so memory and the durable copy may diverge until the next
//! successful save.

use crate::{
    entities::{
        ContactStatus, Feedback, NewStudent, Staff, StaffId, Student, StudentId, StudentUpdate,
    },
    storage::{Persistence, Snapshot},
};
use chrono::Local;
use tracing::{debug, error, info};

/// In-memory store of the tracker's collections.
pub struct Repository {
    pub(crate) students: Vec<Student>,
    pub(crate) staff: Vec<Staff>,
    pub(crate) feedback: Vec<Feedback>,
    store: Box<dyn Persistence>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("students", &self.students.len())
            .field("staff", &self.staff.len())
            .field("feedback", &self.feedback.len())
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Loads whatever the collaborator holds. Never fails; bad data means an empty start.
    #[must_use]
    pub fn load(store: impl Persistence + 'static) -> Self {
        let snapshot = store.load();
        info!(
            "Repository loaded: {} students, {} staff, {} feedback entries",
            snapshot.students.len(),
            snapshot.staff.len(),
            snapshot.feedback.len()
        );
        Self {
            students: snapshot.students,
            staff: snapshot.staff,
            feedback: snapshot.feedback,
            store: Box::new(store),
        }
    }

    /// All students in upload order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Locally known staff in insertion order.
    #[must_use]
    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    /// Feedback log, oldest first.
    #[must_use]
    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    /// Looks up a student by id.
    #[must_use]
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Looks up a locally known staff member by id.
    #[must_use]
    pub fn staff_member(&self, id: StaffId) -> Option<&Staff> {
        self.staff.iter().find(|s| s.id == id)
    }

    /// Students owned by `staff_id`, in upload order.
    #[must_use]
    pub fn students_by_staff(&self, staff_id: StaffId) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.assigned_staff == Some(staff_id))
            .collect()
    }

    /// Copy of all three collections.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            students: self.students.clone(),
            staff: self.staff.clone(),
            feedback: self.feedback.clone(),
        }
    }

    /// Appends uploaded students and returns how many were added.
    ///
    /// Ids continue from the current maximum. Every new student starts
    /// unassigned, pending, not special and dated today.
    pub fn add_students(&mut self, new_students: Vec<NewStudent>) -> usize {
        let max_id = self.students.iter().map(|s| s.id).max().unwrap_or(0);
        let today = Local::now().date_naive();
        let count = new_students.len();

        self.students
            .extend(new_students.into_iter().zip(1..).map(|(new, offset)| Student {
                id: max_id + offset,
                name: new.name,
                phone: new.phone,
                rank: new.rank,
                category: new.category,
                assigned_staff: None,
                status: ContactStatus::Pending,
                is_special: false,
                upload_date: today,
            }));

        self.persist();
        info!("Added {} students (ids from {})", count, max_id + 1);
        count
    }

    /// Applies a partial update. Returns `false` if the student does not exist.
    pub fn update_student(&mut self, id: StudentId, update: &StudentUpdate) -> bool {
        if !self.replace_student(id, update) {
            debug!("update_student: no student with id {}", id);
            return false;
        }
        self.persist();
        true
    }

    /// Removes a student. Feedback about them is kept.
    pub fn delete_student(&mut self, id: StudentId) -> bool {
        let Some(index) = self.students.iter().position(|s| s.id == id) else {
            return false;
        };
        let removed = self.students.remove(index);
        self.persist();
        info!("Deleted student {} ({})", removed.id, removed.name);
        true
    }

    /// Assigns a student to a locally known staff member.
    ///
    /// Both ids must resolve or nothing changes. An existing assignment is
    /// overwritten.
    pub fn assign_student_to_staff(&mut self, student_id: StudentId, staff_id: StaffId) -> bool {
        if self.staff_member(staff_id).is_none() {
            debug!("assign_student_to_staff: unknown staff {}", staff_id);
            return false;
        }
        self.update_student(student_id, &StudentUpdate::assigned_to(staff_id))
    }

    /// Flips the special flag. Returns the new value, or `None` for an unknown id.
    pub fn toggle_special(&mut self, id: StudentId) -> Option<bool> {
        let is_special = !self.student(id)?.is_special;
        self.update_student(id, &StudentUpdate::special(is_special));
        Some(is_special)
    }

    /// Inserts a staff member, replacing any existing record with the same id.
    pub fn add_staff(&mut self, staff: Staff) {
        match self.staff.iter().position(|s| s.id == staff.id) {
            Some(index) => self.staff[index] = staff,
            None => self.staff.push(staff),
        }
        self.persist();
    }

    /// Replaces every collection, e.g. when restoring a backup.
    pub fn replace_all(&mut self, snapshot: Snapshot) {
        self.students = snapshot.students;
        self.staff = snapshot.staff;
        self.feedback = snapshot.feedback;
        self.persist();
    }

    /// Empties every collection.
    pub fn clear_all(&mut self) {
        self.replace_all(Snapshot::default());
        info!("All data cleared");
    }

    /// Swaps in the updated copy of a student without saving.
    pub(crate) fn replace_student(&mut self, id: StudentId, update: &StudentUpdate) -> bool {
        let Some(index) = self.students.iter().position(|s| s.id == id) else {
            return false;
        };
        self.students[index] = update.apply(&self.students[index]);
        true
    }

    /// Writes the current state. Failures are logged, never raised.
    pub(crate) fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.store.save(&snapshot) {
            error!("Error saving data, keeping in-memory state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::storage::MemoryStore;
    use crate::test_utils::*;

    #[test]
    fn test_add_students_continues_ids_and_resets_lifecycle() {
        let (mut repo, store) = seeded_repository();
        let before = store.save_count();

        let added = repo.add_students(vec![new_student("Kiran Rao"), new_student("Meena Iyer")]);

        assert_eq!(added, 2);
        let ids: Vec<_> = repo.students().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
        let fresh = repo.student(7).unwrap();
        assert_eq!(fresh.name, "Meena Iyer");
        assert!(fresh.is_unassigned());
        assert_eq!(fresh.status, ContactStatus::Pending);
        assert!(!fresh.is_special);
        assert_eq!(fresh.upload_date, Local::now().date_naive());
        assert_eq!(store.save_count(), before + 1);
    }

    #[test]
    fn test_add_students_into_empty_repository_starts_at_one() {
        let mut repo = Repository::load(MemoryStore::new());
        repo.add_students(vec![new_student("Kiran Rao")]);
        assert_eq!(repo.students()[0].id, 1);
    }

    #[test]
    fn test_update_student_reports_missing_id() {
        let (mut repo, store) = seeded_repository();
        let before = store.save_count();

        assert!(!repo.update_student(99, &StudentUpdate::status(ContactStatus::Contacted)));
        assert_eq!(store.save_count(), before);
    }

    #[test]
    fn test_update_student_replaces_record() {
        let (mut repo, _store) = seeded_repository();
        assert!(repo.update_student(5, &StudentUpdate::status(ContactStatus::CallBack)));
        assert_eq!(repo.student(5).unwrap().status, ContactStatus::CallBack);
    }

    #[test]
    fn test_delete_student() {
        let (mut repo, _store) = seeded_repository();
        assert!(repo.delete_student(2));
        assert!(repo.student(2).is_none());
        assert!(!repo.delete_student(2));
    }

    #[test]
    fn test_assign_requires_both_ids() {
        let (mut repo, _store) = seeded_repository();

        assert!(!repo.assign_student_to_staff(5, 42));
        assert!(repo.student(5).unwrap().is_unassigned());
        assert!(!repo.assign_student_to_staff(42, 2));

        assert!(repo.assign_student_to_staff(5, 2));
        assert_eq!(repo.student(5).unwrap().assigned_staff, Some(2));
    }

    #[test]
    fn test_toggle_special() {
        let (mut repo, _store) = seeded_repository();
        assert_eq!(repo.toggle_special(5), Some(true));
        assert_eq!(repo.toggle_special(5), Some(false));
        assert_eq!(repo.toggle_special(99), None);
    }

    #[test]
    fn test_failed_save_keeps_memory_authoritative() {
        let (mut repo, store) = seeded_repository();
        store.set_fail_saves(true);

        assert!(repo.delete_student(1));

        assert!(repo.student(1).is_none());
        assert!(store.snapshot().students.iter().any(|s| s.id == 1));
    }

    #[test]
    fn test_clear_all() {
        let (mut repo, store) = seeded_repository();
        repo.clear_all();
        assert!(repo.students().is_empty());
        assert_eq!(store.snapshot(), Snapshot::default());
    }
}
