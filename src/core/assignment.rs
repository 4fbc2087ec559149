//! Assignment engine - decides which staff member owns which student.
//!
//! Three strategies: round-robin auto assignment over active staff, special
//! students routed to the current top performers, and manual assignment.
//! None of them guard against reassignment: assigning an owned student again
//! overwrites the previous owner.

use super::{PerformanceAggregator, Repository, StaffDirectory};
use crate::entities::{StaffId, StudentId, StudentUpdate};
use tracing::{debug, info};

/// How many top performers special students are spread across.
pub const SPECIAL_PERFORMER_LIMIT: usize = 2;

/// Result of [`AssignmentEngine::assign_special_students`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialAssignment {
    /// This many special students were assigned
    Assigned(usize),
    /// Every special student already has an owner
    NoSpecialStudents,
    /// No active staff member has a track record to rank on
    NoTopPerformers,
}

impl SpecialAssignment {
    /// Number of students assigned; 0 for either no-op outcome.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Assigned(count) => count,
            Self::NoSpecialStudents | Self::NoTopPerformers => 0,
        }
    }

    /// Message suitable for showing to the admin.
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::Assigned(count) => {
                format!("{count} special students assigned to top-performing staff.")
            }
            Self::NoSpecialStudents => "No unassigned special students found.".to_string(),
            Self::NoTopPerformers => {
                "No staff with performance data available for special assignment.".to_string()
            }
        }
    }
}

/// Writes assignments into the repository using a staff directory.
pub struct AssignmentEngine<'a> {
    repository: &'a mut Repository,
    directory: &'a dyn StaffDirectory,
}

impl<'a> AssignmentEngine<'a> {
    /// Creates an engine over the given repository and staff source.
    pub fn new(repository: &'a mut Repository, directory: &'a dyn StaffDirectory) -> Self {
        Self {
            repository,
            directory,
        }
    }

    /// Spreads every unassigned student over the active staff, round robin.
    ///
    /// Active staff come from the directory and unassigned students from the
    /// repository, both in their stored order. The `i`-th unassigned student
    /// goes to active staff member `i mod K`. The repository is saved once.
    ///
    /// # Returns
    /// The number of students assigned; 0 with no changes when there is no
    /// active staff or nothing to assign
    pub fn auto_assign_students(&mut self) -> usize {
        let active_staff = self.directory.active_staff();
        let unassigned = self.unassigned_students(false);

        if active_staff.is_empty() || unassigned.is_empty() {
            info!(
                "Auto assignment skipped: {} active staff, {} unassigned students",
                active_staff.len(),
                unassigned.len()
            );
            return 0;
        }

        let targets: Vec<StaffId> = active_staff.iter().map(|s| s.id).collect();
        let count = self.distribute(&unassigned, &targets);
        info!(
            "Auto assigned {} students across {} staff",
            count,
            targets.len()
        );
        count
    }

    /// Assigns one student to one staff member from the directory.
    ///
    /// # Arguments
    /// * `student_id` - Student to assign
    /// * `staff_id` - Staff member looked up through the directory
    ///
    ///
    /// Returns `false` and changes nothing when either id does not resolve.
    /// An existing owner is overwritten.
    pub fn assign_student_to_staff(&mut self, student_id: StudentId, staff_id: StaffId) -> bool {
        if self.directory.find(staff_id).is_none() {
            debug!("Manual assignment rejected: unknown staff {}", staff_id);
            return false;
        }
        if let Some(previous) = self
            .repository
            .student(student_id)
            .and_then(|s| s.assigned_staff)
        {
            debug!(
                "Reassigning student {} from staff {} to {}",
                student_id, previous, staff_id
            );
        }
        self.repository
            .update_student(student_id, &StudentUpdate::assigned_to(staff_id))
    }

    /// Routes unassigned special students to the top performers.
    ///
    /// The ranking is recomputed from current data on every call. Only the
    /// best [`SPECIAL_PERFORMER_LIMIT`] of it take part, and students are
    /// spread across them round robin.
    ///
    /// # Returns
    /// `Assigned(n)` on success, otherwise the no-op outcome that applied
    /// (checked in order: no special students, then no ranked staff)
    pub fn assign_special_students(&mut self) -> SpecialAssignment {
        let special = self.unassigned_students(true);
        if special.is_empty() {
            info!("Special assignment skipped: no unassigned special students");
            return SpecialAssignment::NoSpecialStudents;
        }

        let targets: Vec<StaffId> = PerformanceAggregator::new(&*self.repository, self.directory)
            .top_performing_staff()
            .into_iter()
            .take(SPECIAL_PERFORMER_LIMIT)
            .map(|r| r.staff.id)
            .collect();
        if targets.is_empty() {
            info!(
                "Special assignment skipped: {} special students but no ranked staff",
                special.len()
            );
            return SpecialAssignment::NoTopPerformers;
        }

        let count = self.distribute(&special, &targets);
        info!(
            "Assigned {} special students to top performers {:?}",
            count, targets
        );
        SpecialAssignment::Assigned(count)
    }

    /// Gives every unassigned special student to one chosen staff member.
    /// Returns 0 when the staff member is unknown or nobody is waiting.
    pub fn assign_special_to(&mut self, staff_id: StaffId) -> usize {
        let Some(staff) = self.directory.find(staff_id) else {
            debug!("Special assignment rejected: unknown staff {}", staff_id);
            return 0;
        };
        let special = self.unassigned_students(true);
        if special.is_empty() {
            return 0;
        }
        let count = self.distribute(&special, &[staff.id]);
        info!("{} special students assigned to {}", count, staff.name);
        count
    }

    fn unassigned_students(&self, special_only: bool) -> Vec<StudentId> {
        self.repository
            .students()
            .iter()
            .filter(|s| s.is_unassigned() && (!special_only || s.is_special))
            .map(|s| s.id)
            .collect()
    }

    /// Round robin: student `i` goes to `targets[i % targets.len()]`. Saves once.
    fn distribute(&mut self, students: &[StudentId], targets: &[StaffId]) -> usize {
        let mut count = 0;
        for (index, &student_id) in students.iter().enumerate() {
            let staff_id = targets[index % targets.len()];
            if self
                .repository
                .replace_student(student_id, &StudentUpdate::assigned_to(staff_id))
            {
                count += 1;
            }
        }
        self.repository.persist();
        count
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{LocalStaffDirectory, UserDirectory};
    use crate::entities::{ContactStatus, Staff};
    use crate::storage::MemoryStore;
    use crate::test_utils::*;
    use std::collections::HashMap;

    fn owners(repo: &Repository, ids: &[StudentId]) -> Vec<Option<StaffId>> {
        ids.iter()
            .map(|id| repo.student(*id).unwrap().assigned_staff)
            .collect()
    }

    #[test]
    fn test_auto_assign_is_round_robin_and_fair() {
        let mut repo = Repository::load(MemoryStore::new());
        for id in [7, 3, 5] {
            repo.add_staff(Staff::new(id, format!("Staff {id}")));
        }
        repo.add_students((0..8).map(|i| new_student(&format!("Student {i}"))).collect());
        let directory = LocalStaffDirectory::from_repository(&repo);

        let assigned = AssignmentEngine::new(&mut repo, &directory).auto_assign_students();

        assert_eq!(assigned, 8);
        let ids: Vec<_> = (1..=8).collect();
        assert_eq!(
            owners(&repo, &ids),
            [7, 3, 5, 7, 3, 5, 7, 3].map(Some).to_vec()
        );
        let mut per_staff: HashMap<StaffId, usize> = HashMap::new();
        for s in repo.students() {
            *per_staff.entry(s.assigned_staff.unwrap()).or_default() += 1;
        }
        let max = per_staff.values().max().unwrap();
        let min = per_staff.values().min().unwrap();
        assert!(max - min <= 1);
    }

    #[test]
    fn test_auto_assign_only_touches_unassigned_and_skips_inactive() {
        let (mut repo, _store) = seeded_repository();
        repo.add_students(vec![new_student("Kiran Rao"), new_student("Meena Iyer")]);
        let directory = LocalStaffDirectory::from_repository(&repo);

        let assigned = AssignmentEngine::new(&mut repo, &directory).auto_assign_students();

        // Vikram (5), Kiran (6), Meena (7) over John (2) and Sarah (3); Ravi (4) is inactive.
        assert_eq!(assigned, 3);
        assert_eq!(owners(&repo, &[5, 6, 7]), vec![Some(2), Some(3), Some(2)]);
        assert_eq!(owners(&repo, &[1, 3]), vec![Some(2), Some(3)]);
    }

    #[test]
    fn test_auto_assign_without_staff_is_a_no_op() {
        let (mut repo, store) = seeded_repository();
        let before = repo.snapshot();
        let saves = store.save_count();
        let directory = LocalStaffDirectory::default();

        assert_eq!(AssignmentEngine::new(&mut repo, &directory).auto_assign_students(), 0);

        assert_eq!(repo.snapshot(), before);
        assert_eq!(store.save_count(), saves);
    }

    #[test]
    fn test_auto_assign_without_unassigned_students_is_a_no_op() {
        let (mut repo, store) = seeded_repository();
        assert!(repo.delete_student(5));
        let before = repo.snapshot();
        let saves = store.save_count();
        let directory = LocalStaffDirectory::from_repository(&repo);

        assert_eq!(AssignmentEngine::new(&mut repo, &directory).auto_assign_students(), 0);

        assert_eq!(repo.snapshot(), before);
        assert_eq!(store.save_count(), saves);
    }

    #[test]
    fn test_auto_assign_uses_identity_directory() {
        let (mut repo, _store) = seeded_repository();
        let directory = UserDirectory::new(sample_users());

        let assigned = AssignmentEngine::new(&mut repo, &directory).auto_assign_students();

        assert_eq!(assigned, 1);
        assert_eq!(repo.student(5).unwrap().assigned_staff, Some(2));
    }

    #[test]
    fn test_manual_assignment_validates_both_ids() {
        let (mut repo, _store) = seeded_repository();
        let before = repo.snapshot();
        let directory = LocalStaffDirectory::from_repository(&repo);
        let mut engine = AssignmentEngine::new(&mut repo, &directory);

        assert!(!engine.assign_student_to_staff(5, 99));
        assert!(!engine.assign_student_to_staff(99, 2));
        assert_eq!(repo.snapshot(), before);
    }

    #[test]
    fn test_manual_assignment_overwrites_existing_owner() {
        let (mut repo, _store) = seeded_repository();
        let directory = LocalStaffDirectory::from_repository(&repo);
        assert_eq!(repo.student(1).unwrap().assigned_staff, Some(2));

        assert!(AssignmentEngine::new(&mut repo, &directory).assign_student_to_staff(1, 3));

        assert_eq!(repo.student(1).unwrap().assigned_staff, Some(3));
        assert_eq!(repo.student(1).unwrap().status, ContactStatus::Contacted);
    }

    #[test]
    fn test_special_students_go_to_top_two_only() {
        let (mut repo, _store) = seeded_repository();
        // Third ranked performer: Ravi back on duty with one contacted student of three.
        repo.add_staff(Staff::new(4, "Ravi Kumar"));
        repo.add_students((0..3).map(|i| new_student(&format!("Ravi {i}"))).collect());
        for id in 6..=8 {
            assert!(repo.assign_student_to_staff(id, 4));
        }
        assert!(repo.update_student(6, &StudentUpdate::status(ContactStatus::Contacted)));
        repo.add_students((0..5).map(|i| new_student(&format!("Special {i}"))).collect());
        for id in 9..=13 {
            assert_eq!(repo.toggle_special(id), Some(true));
        }
        let directory = LocalStaffDirectory::from_repository(&repo);
        let top: Vec<_> = PerformanceAggregator::new(&repo, &directory)
            .top_performing_staff()
            .into_iter()
            .map(|r| r.staff.id)
            .collect();
        // John 2/2, Sarah 1/2, Ravi 1/3
        assert_eq!(top, vec![2, 3, 4]);

        let outcome = AssignmentEngine::new(&mut repo, &directory).assign_special_students();

        assert_eq!(outcome, SpecialAssignment::Assigned(5));
        assert_eq!(
            owners(&repo, &[9, 10, 11, 12, 13]),
            [2, 3, 2, 3, 2].map(Some).to_vec()
        );
        // Vikram is not special and stays unassigned.
        assert!(repo.student(5).unwrap().is_unassigned());
    }

    #[test]
    fn test_special_assignment_no_op_outcomes() {
        let (mut repo, _store) = seeded_repository();
        let directory = LocalStaffDirectory::from_repository(&repo);
        let outcome = AssignmentEngine::new(&mut repo, &directory).assign_special_students();
        assert_eq!(outcome, SpecialAssignment::NoSpecialStudents);
        assert_eq!(outcome.count(), 0);

        let mut repo = Repository::load(MemoryStore::new());
        repo.add_staff(Staff::new(2, "John Smith"));
        repo.add_students(vec![new_student("Kiran Rao")]);
        repo.toggle_special(1);
        let directory = LocalStaffDirectory::from_repository(&repo);
        let outcome = AssignmentEngine::new(&mut repo, &directory).assign_special_students();
        assert_eq!(outcome, SpecialAssignment::NoTopPerformers);
        assert!(repo.student(1).unwrap().is_unassigned());
    }

    #[test]
    fn test_assign_special_to_chosen_staff() {
        let (mut repo, _store) = seeded_repository();
        repo.add_students(vec![new_student("Kiran Rao"), new_student("Meena Iyer")]);
        repo.toggle_special(6);
        repo.toggle_special(7);
        let directory = LocalStaffDirectory::from_repository(&repo);
        let mut engine = AssignmentEngine::new(&mut repo, &directory);

        assert_eq!(engine.assign_special_to(99), 0);
        assert_eq!(engine.assign_special_to(3), 2);
        assert_eq!(owners(&repo, &[6, 7]), vec![Some(3), Some(3)]);
    }
}
