//! Roster search by free text and structured filters.

use super::Repository;
use crate::entities::{ContactStatus, StaffId, Student};

/// Structured filters for [`Repository::search_students`]. Unset fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Exact category code
    pub category: Option<String>,
    /// Exact status
    pub status: Option<ContactStatus>,
    /// Owning staff member
    pub staff_id: Option<StaffId>,
    /// Special flag
    pub is_special: Option<bool>,
}

impl StudentFilter {
    fn matches(&self, student: &Student) -> bool {
        self.category.as_ref().is_none_or(|c| &student.category == c)
            && self.status.is_none_or(|s| student.status == s)
            && self.staff_id.is_none_or(|id| student.assigned_staff == Some(id))
            && self.is_special.is_none_or(|flag| student.is_special == flag)
    }
}

impl Repository {
    /// Students whose name (case-insensitive), phone or rank contains `query`
    /// and who pass `filter`. An empty query matches every student.
    #[must_use]
    pub fn search_students(&self, query: &str, filter: &StudentFilter) -> Vec<&Student> {
        let term = query.trim().to_lowercase();
        self.students
            .iter()
            .filter(|s| {
                term.is_empty()
                    || s.name.to_lowercase().contains(&term)
                    || s.phone.contains(&term)
                    || s.rank.to_string().contains(&term)
            })
            .filter(|s| filter.matches(s))
            .collect()
    }
}
