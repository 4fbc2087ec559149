//! Report generation.
//!
//! Reports are value objects built from the current repository state. Building
//! one never mutates anything, so callers may regenerate freely. Rendering and
//! export live elsewhere.

use super::{
    PerformanceAggregator, Repository, StaffDirectory, StaffPerformance, Statistics,
    performance::percentage,
};
use crate::entities::{Feedback, StaffId, Student};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// How many of the latest feedback entries a report carries.
pub const RECENT_FEEDBACK_LIMIT: usize = 10;

/// Student counts grouped three ways.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentBreakdown {
    /// Category code -> students
    pub by_category: BTreeMap<String, usize>,
    /// Status -> students
    pub by_status: BTreeMap<String, usize>,
    /// Staff name -> assigned students; dangling owners count as "Unknown"
    pub by_staff: BTreeMap<String, usize>,
}

/// Admin-wide report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// When the report was built
    pub generated_at: DateTime<Utc>,
    /// Dashboard numbers
    pub statistics: Statistics,
    /// One line per staff member
    pub staff_performance: Vec<StaffPerformance>,
    /// Grouped counts
    pub student_breakdown: StudentBreakdown,
    /// Latest feedback, oldest first
    pub feedback: Vec<Feedback>,
}

/// Report scoped to one staff member's caseload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffReport {
    /// When the report was built
    pub generated_at: DateTime<Utc>,
    /// Staff id
    pub staff_id: StaffId,
    /// Staff name, "Unknown" when the id does not resolve
    pub staff_name: String,
    /// Students owned by this staff member
    pub students: Vec<Student>,
    /// Owned students no longer pending
    pub completed_count: usize,
    /// Owned students still pending
    pub pending_count: usize,
    /// Percentage with one decimal
    pub completion_rate: String,
    /// Feedback recorded by this staff member, oldest first
    pub feedback: Vec<Feedback>,
    /// Status -> owned students
    pub status_breakdown: BTreeMap<String, usize>,
}

/// Builds reports from a repository and staff directory.
pub struct ReportGenerator<'a> {
    repository: &'a Repository,
    directory: &'a dyn StaffDirectory,
}

impl<'a> ReportGenerator<'a> {
    /// Creates a generator over the given repository and staff source.
    #[must_use]
    pub fn new(repository: &'a Repository, directory: &'a dyn StaffDirectory) -> Self {
        Self {
            repository,
            directory,
        }
    }

    /// Generates the full outreach report.
    ///
    /// Pure read over the repository: calling it twice without mutations in
    /// between yields the same content apart from `generated_at`.
    ///
    /// # Returns
    /// A `Report` with dashboard statistics, performance for every staff
    /// member (inactive ones included), breakdowns by category, status and
    /// owner, and the last [`RECENT_FEEDBACK_LIMIT`] feedback entries oldest
    /// first
    #[must_use]
    pub fn generate_report(&self) -> Report {
        let aggregator = PerformanceAggregator::new(self.repository, self.directory);
        Report {
            generated_at: Utc::now(),
            statistics: aggregator.statistics(),
            staff_performance: aggregator.staff_performance(),
            student_breakdown: self.student_breakdown(),
            feedback: self.recent_feedback(),
        }
    }

    /// Counts by category, status and owning staff name.
    #[must_use]
    pub fn student_breakdown(&self) -> StudentBreakdown {
        let students = self.repository.students();
        let mut breakdown = StudentBreakdown {
            by_status: status_counts(students.iter()),
            ..StudentBreakdown::default()
        };

        for student in students {
            *breakdown
                .by_category
                .entry(student.category.clone())
                .or_default() += 1;

            if let Some(staff_id) = student.assigned_staff {
                *breakdown
                    .by_staff
                    .entry(self.directory.name_of(staff_id))
                    .or_default() += 1;
            }
        }
        breakdown
    }

    /// Report over one staff member's students and feedback.
    #[must_use]
    pub fn generate_staff_report(&self, staff_id: StaffId) -> StaffReport {
        let students: Vec<Student> = self
            .repository
            .students_by_staff(staff_id)
            .into_iter()
            .cloned()
            .collect();
        let completed_count = students.iter().filter(|s| s.status.is_completed()).count();

        StaffReport {
            generated_at: Utc::now(),
            staff_id,
            staff_name: self.directory.name_of(staff_id),
            completed_count,
            pending_count: students.len() - completed_count,
            completion_rate: format!("{:.1}", percentage(completed_count, students.len())),
            status_breakdown: status_counts(students.iter()),
            feedback: self
                .repository
                .feedback_by_staff(staff_id)
                .into_iter()
                .cloned()
                .collect(),
            students,
        }
    }

    fn recent_feedback(&self) -> Vec<Feedback> {
        let log = self.repository.feedback();
        log[log.len().saturating_sub(RECENT_FEEDBACK_LIMIT)..].to_vec()
    }
}

fn status_counts<'s>(students: impl Iterator<Item = &'s Student>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for student in students {
        *counts.entry(student.status.to_string()).or_default() += 1;
    }
    counts
}
