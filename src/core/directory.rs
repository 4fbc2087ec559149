//! Staff directory - the single source of "who can take students".
//!
//! Two interchangeable sources exist: the repository's own staff collection
//! and the identity side's user list. Engine code only sees [`StaffDirectory`].

use super::Repository;
use crate::entities::{Role, Staff, StaffId, User};

/// Authoritative staff list for assignment and reporting.
pub trait StaffDirectory {
    /// Staff eligible for new assignments, in a stable order.
    fn active_staff(&self) -> Vec<Staff>;

    /// Every staff member known to the directory, active or not.
    fn all_staff(&self) -> Vec<Staff>;

    /// Looks up one staff member.
    fn find(&self, id: StaffId) -> Option<Staff> {
        self.all_staff().into_iter().find(|s| s.id == id)
    }

    /// Display name for `id`, `"Unknown"` when it does not resolve.
    fn name_of(&self, id: StaffId) -> String {
        self.find(id).map_or_else(|| UNKNOWN.to_string(), |s| s.name)
    }
}

/// Placeholder shown for references that no longer resolve.
pub const UNKNOWN: &str = "Unknown";

/// Directory over the repository's locally stored staff.
#[derive(Debug, Clone, Default)]
pub struct LocalStaffDirectory {
    staff: Vec<Staff>,
}

impl LocalStaffDirectory {
    /// Directory over an explicit staff list.
    #[must_use]
    pub const fn new(staff: Vec<Staff>) -> Self {
        Self { staff }
    }

    /// Directory over the repository's current staff collection.
    #[must_use]
    pub fn from_repository(repository: &Repository) -> Self {
        Self::new(repository.staff().to_vec())
    }
}

impl StaffDirectory for LocalStaffDirectory {
    fn active_staff(&self) -> Vec<Staff> {
        self.staff.iter().filter(|s| s.is_active).cloned().collect()
    }

    fn all_staff(&self) -> Vec<Staff> {
        self.staff.clone()
    }
}

/// Directory over identity users holding the staff role.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Directory over the given users; non-staff users are ignored.
    #[must_use]
    pub const fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// All users in the directory, including admins.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Users holding `role` that are still active.
    #[must_use]
    pub fn users_by_role(&self, role: Role) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.role == role && u.is_active)
            .collect()
    }

    /// Marks a user inactive. Returns `false` for an unknown id.
    pub fn deactivate_user(&mut self, id: StaffId) -> bool {
        let Some(index) = self.users.iter().position(|u| u.id == id) else {
            return false;
        };
        self.users[index] = User {
            is_active: false,
            ..self.users[index].clone()
        };
        true
    }
}

impl StaffDirectory for UserDirectory {
    fn active_staff(&self) -> Vec<Staff> {
        self.users_by_role(Role::Staff)
            .into_iter()
            .map(User::to_staff)
            .collect()
    }

    fn all_staff(&self) -> Vec<Staff> {
        self.users
            .iter()
            .filter(|u| u.role == Role::Staff)
            .map(User::to_staff)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_staff, sample_users};

    #[test]
    fn test_local_directory_filters_inactive() {
        let directory = LocalStaffDirectory::new(sample_staff());
        let active: Vec<_> = directory.active_staff().into_iter().map(|s| s.id).collect();
        assert_eq!(active, vec![2, 3]);
        assert_eq!(directory.all_staff().len(), 3);
    }

    #[test]
    fn test_user_directory_only_exposes_staff_role() {
        let mut directory = UserDirectory::new(sample_users());
        let ids: Vec<_> = directory.active_staff().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(directory.find(1).is_none());

        assert!(directory.deactivate_user(3));
        let ids: Vec<_> = directory.active_staff().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(directory.all_staff().len(), 2);
        assert!(!directory.deactivate_user(42));
    }

    #[test]
    fn test_name_of_falls_back_to_unknown() {
        let directory = LocalStaffDirectory::new(sample_staff());
        assert_eq!(directory.name_of(2), "John Smith");
        assert_eq!(directory.name_of(77), UNKNOWN);
    }
}
