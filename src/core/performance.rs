//! Performance aggregation - completion rates, staff ranking and dashboard statistics.
//!
//! Everything here is recomputed from the repository on each call; nothing is
//! cached, so rankings always reflect the latest feedback.

use super::{Repository, StaffDirectory};
use crate::entities::{Staff, Student};
use serde::Serialize;
use std::cmp::Ordering;

/// How many staff [`PerformanceAggregator::top_performing_staff`] returns.
pub const TOP_PERFORMER_LIMIT: usize = 3;

/// A staff member with the counts used for ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStaff {
    /// The staff member
    pub staff: Staff,
    /// Students currently assigned
    pub assigned_count: usize,
    /// Assigned students no longer pending
    pub completed_count: usize,
    /// `completed_count / assigned_count`, 0..=1
    pub completion_rate: f64,
}

/// Per-staff line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPerformance {
    /// Staff id
    pub staff_id: u64,
    /// Staff display name
    pub staff_name: String,
    /// Students currently assigned
    pub assigned_count: usize,
    /// Assigned students no longer pending
    pub completed_count: usize,
    /// Assigned students still pending
    pub pending_count: usize,
    /// Percentage with one decimal, e.g. `"66.7"`
    pub completion_rate: String,
    /// Feedback entries recorded by this staff member
    pub feedback_count: usize,
}

/// Dashboard numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// All students
    pub total_students: usize,
    /// Students with an owner
    pub assigned_students: usize,
    /// Students still pending
    pub pending_students: usize,
    /// Students no longer pending
    pub completed_students: usize,
    /// Staff eligible for assignments
    pub active_staff: usize,
    /// Students flagged special
    pub special_students: usize,
    /// Assigned share of all students, percent with one decimal
    pub assignment_rate: f64,
    /// Completed share of all students, percent with one decimal
    pub completion_rate: f64,
}

/// Read-only view computing performance figures.
pub struct PerformanceAggregator<'a> {
    repository: &'a Repository,
    directory: &'a dyn StaffDirectory,
}

impl<'a> PerformanceAggregator<'a> {
    /// Creates an aggregator over the given repository and staff source.
    #[must_use]
    pub fn new(repository: &'a Repository, directory: &'a dyn StaffDirectory) -> Self {
        Self {
            repository,
            directory,
        }
    }

    /// Best active staff by completion rate, at most [`TOP_PERFORMER_LIMIT`].
    ///
    /// Completion rate is the share of a staff member's students whose status
    /// is no longer pending. Staff without assigned students are left out.
    /// Ties on rate go to the higher completed count; remaining ties keep
    /// directory order.
    ///
    /// # Returns
    /// Ranked staff, best first, each with assigned and completed counts and
    /// the rate as a fraction between 0 and 1
    #[must_use]
    pub fn top_performing_staff(&self) -> Vec<RankedStaff> {
        let mut ranked: Vec<RankedStaff> = self
            .directory
            .active_staff()
            .into_iter()
            .map(|staff| {
                let assigned = self.repository.students_by_staff(staff.id);
                let (assigned_count, completed_count) = assigned_and_completed(&assigned);
                RankedStaff {
                    staff,
                    assigned_count,
                    completed_count,
                    completion_rate: fraction(completed_count, assigned_count),
                }
            })
            .filter(|r| r.assigned_count > 0)
            .collect();

        ranked.sort_by(|a, b| {
            b.completion_rate
                .partial_cmp(&a.completion_rate)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.completed_count.cmp(&a.completed_count))
        });
        ranked.truncate(TOP_PERFORMER_LIMIT);
        ranked
    }

    /// Dashboard statistics. Rates are 0 when there are no students.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        let students = self.repository.students();
        let total_students = students.len();
        let assigned_students = students.iter().filter(|s| !s.is_unassigned()).count();
        let completed_students = students.iter().filter(|s| s.status.is_completed()).count();

        Statistics {
            total_students,
            assigned_students,
            pending_students: total_students - completed_students,
            completed_students,
            active_staff: self.directory.active_staff().len(),
            special_students: students.iter().filter(|s| s.is_special).count(),
            assignment_rate: percentage(assigned_students, total_students),
            completion_rate: percentage(completed_students, total_students),
        }
    }

    /// One line per staff member in the directory, inactive ones included.
    #[must_use]
    pub fn staff_performance(&self) -> Vec<StaffPerformance> {
        self.directory
            .all_staff()
            .into_iter()
            .map(|staff| {
                let assigned = self.repository.students_by_staff(staff.id);
                let (assigned_count, completed_count) = assigned_and_completed(&assigned);
                StaffPerformance {
                    staff_id: staff.id,
                    staff_name: staff.name,
                    assigned_count,
                    completed_count,
                    pending_count: assigned_count - completed_count,
                    completion_rate: format!("{:.1}", percentage(completed_count, assigned_count)),
                    feedback_count: self.repository.feedback_by_staff(staff.id).len(),
                }
            })
            .collect()
    }
}

fn assigned_and_completed(assigned: &[&Student]) -> (usize, usize) {
    let completed = assigned.iter().filter(|s| s.status.is_completed()).count();
    (assigned.len(), completed)
}

/// `part / whole`, or 0 when `whole` is 0.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

/// Percentage rounded to one decimal place, 0 when `whole` is 0.
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    (fraction(part, whole) * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::LocalStaffDirectory;
    use crate::entities::{ContactStatus, Staff, StudentUpdate};
    use crate::storage::MemoryStore;
    use crate::test_utils::*;

    /// Gives `staff_id` `assigned` fresh students, `completed` of them contacted.
    fn give(repo: &mut Repository, staff_id: u64, assigned: usize, completed: usize) {
        let start = repo.students().len() as u64 + 1;
        repo.add_students(
            (0..assigned)
                .map(|i| new_student(&format!("S{staff_id}-{i}")))
                .collect(),
        );
        for (offset, id) in (start..start + assigned as u64).enumerate() {
            repo.assign_student_to_staff(id, staff_id);
            if offset < completed {
                repo.update_student(id, &StudentUpdate::status(ContactStatus::Contacted));
            }
        }
    }

    fn repo_with_staff(staff: Vec<Staff>) -> Repository {
        let mut repo = Repository::load(MemoryStore::new());
        for member in staff {
            repo.add_staff(member);
        }
        repo
    }

    #[test]
    fn test_tie_on_rate_goes_to_higher_completed_count() {
        let mut repo = repo_with_staff(vec![Staff::new(10, "B"), Staff::new(11, "A")]);
        give(&mut repo, 10, 4, 2);
        give(&mut repo, 11, 10, 5);
        let directory = LocalStaffDirectory::from_repository(&repo);

        let top = PerformanceAggregator::new(&repo, &directory).top_performing_staff();

        let ids: Vec<_> = top.iter().map(|r| r.staff.id).collect();
        assert_eq!(ids, vec![11, 10]);
        assert_eq!(top[0].completion_rate, 0.5);
        assert_eq!(top[0].completed_count, 5);
    }

    #[test]
    fn test_ranking_drops_unassigned_and_caps_at_three() {
        let mut repo = repo_with_staff(
            (1..=5)
                .map(|id| Staff::new(id, format!("Staff {id}")))
                .collect(),
        );
        give(&mut repo, 1, 2, 0);
        give(&mut repo, 2, 2, 2);
        give(&mut repo, 3, 4, 3);
        give(&mut repo, 4, 2, 1);
        let directory = LocalStaffDirectory::from_repository(&repo);

        let top = PerformanceAggregator::new(&repo, &directory).top_performing_staff();

        let ids: Vec<_> = top.iter().map(|r| r.staff.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn test_ranking_ignores_inactive_staff() {
        let mut repo = repo_with_staff(vec![
            Staff::new(1, "Active"),
            Staff {
                is_active: false,
                ..Staff::new(2, "Gone")
            },
        ]);
        give(&mut repo, 1, 2, 1);
        give(&mut repo, 2, 2, 2);
        let directory = LocalStaffDirectory::from_repository(&repo);

        let top = PerformanceAggregator::new(&repo, &directory).top_performing_staff();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].staff.id, 1);
    }

    #[test]
    fn test_ranking_is_stable_across_calls() {
        let (repo, _store) = seeded_repository();
        let directory = LocalStaffDirectory::from_repository(&repo);
        let aggregator = PerformanceAggregator::new(&repo, &directory);

        assert_eq!(aggregator.top_performing_staff(), aggregator.top_performing_staff());
    }

    #[test]
    fn test_statistics_on_empty_roster_are_zero() {
        let repo = Repository::load(MemoryStore::new());
        let directory = LocalStaffDirectory::default();

        let stats = PerformanceAggregator::new(&repo, &directory).statistics();

        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.assignment_rate, 0.0);
        assert_eq!(stats.completion_rate, 0.0);
        assert!(!stats.completion_rate.is_nan());
    }

    #[test]
    fn test_statistics_on_seeded_roster() {
        let (repo, _store) = seeded_repository();
        let directory = LocalStaffDirectory::from_repository(&repo);

        let stats = PerformanceAggregator::new(&repo, &directory).statistics();

        assert_eq!(stats.total_students, 5);
        assert_eq!(stats.assigned_students, 4);
        assert_eq!(stats.pending_students, 2);
        assert_eq!(stats.completed_students, 3);
        assert_eq!(stats.active_staff, 2);
        assert_eq!(stats.special_students, 1);
        assert_eq!(stats.assignment_rate, 80.0);
        assert_eq!(stats.completion_rate, 60.0);
    }

    #[test]
    fn test_staff_performance_includes_inactive_staff() {
        let (repo, _store) = seeded_repository();
        let directory = LocalStaffDirectory::from_repository(&repo);

        let lines = PerformanceAggregator::new(&repo, &directory).staff_performance();

        assert_eq!(lines.len(), 3);
        let john = &lines[0];
        assert_eq!(john.staff_name, "John Smith");
        assert_eq!(john.assigned_count, 2);
        assert_eq!(john.completed_count, 2);
        assert_eq!(john.completion_rate, "100.0");
        assert_eq!(john.feedback_count, 2);
        let idle = &lines[2];
        assert_eq!(idle.assigned_count, 0);
        assert_eq!(idle.completion_rate, "0.0");
    }

    #[test]
    fn test_percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(1, 8), 12.5);
        assert_eq!(percentage(3, 0), 0.0);
    }
}
