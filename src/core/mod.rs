//! Core business logic - assignment, performance and reporting over the repository.
//!
//! Nothing in here knows about files, terminals or rendering. Collaborators are
//! passed in explicitly: the [`Repository`] owns the data and a
//! [`StaffDirectory`] says who the staff are.

/// Assignment strategies (round robin, special, manual)
pub mod assignment;
/// Staff directory capability and its two sources
pub mod directory;
/// Feedback log operations on the repository
pub mod feedback;
/// Completion rates, ranking and statistics
pub mod performance;
/// Report value objects
pub mod report;
/// In-memory store with persistence hooks
pub mod repository;
/// Roster search
pub mod search;

pub use assignment::{AssignmentEngine, SPECIAL_PERFORMER_LIMIT, SpecialAssignment};
pub use directory::{LocalStaffDirectory, StaffDirectory, UNKNOWN, UserDirectory};
pub use performance::{
    PerformanceAggregator, RankedStaff, StaffPerformance, Statistics, TOP_PERFORMER_LIMIT,
};
pub use report::{RECENT_FEEDBACK_LIMIT, Report, ReportGenerator, StaffReport, StudentBreakdown};
pub use repository::Repository;
pub use search::StudentFilter;
