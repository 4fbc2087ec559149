//! Shared test utilities.
//!
//! The seeded repository mirrors a small outreach desk:
//!
//! | id | student      | owner | status         | special |
//! |----|--------------|-------|----------------|---------|
//! | 1  | Aarav Sharma | 2     | contacted      |         |
//! | 2  | Diya Patel   | 2     | interested     |         |
//! | 3  | Rohan Reddy  | 3     | pending        | yes     |
//! | 4  | Priya Kumar  | 3     | not-interested |         |
//! | 5  | Vikram Singh | -     | pending        |         |
//!
//! Staff: John Smith (2), Sarah Johnson (3), Ravi Kumar (4, inactive).
//! Feedback ids 1-4 cover students 1-4, recorded by their owners.

use crate::{
    core::Repository,
    entities::{ContactStatus, Feedback, NewStudent, Role, Staff, StaffId, Student, User},
    storage::{MemoryStore, Snapshot},
};
use chrono::{Duration, NaiveDate, Utc};

/// Upload payload with sensible defaults.
pub fn new_student(name: &str) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        phone: "9000000000".to_string(),
        rank: 5000,
        category: "OC".to_string(),
    }
}

/// Unassigned pending student with the given id.
pub fn sample_student(id: u64, name: &str) -> Student {
    Student {
        id,
        name: name.to_string(),
        phone: "9876543210".to_string(),
        rank: 1000,
        category: "OC".to_string(),
        assigned_staff: None,
        status: ContactStatus::Pending,
        is_special: false,
        upload_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap_or_default(),
    }
}

fn student(
    id: u64,
    name: &str,
    phone: &str,
    rank: u32,
    category: &str,
    owner: Option<StaffId>,
    status: ContactStatus,
) -> Student {
    Student {
        phone: phone.to_string(),
        rank,
        category: category.to_string(),
        assigned_staff: owner,
        status,
        ..sample_student(id, name)
    }
}

/// Two active staff and one inactive.
pub fn sample_staff() -> Vec<Staff> {
    vec![
        Staff::new(2, "John Smith"),
        Staff::new(3, "Sarah Johnson"),
        Staff {
            is_active: false,
            ..Staff::new(4, "Ravi Kumar")
        },
    ]
}

/// Identity users: one admin and two staff.
pub fn sample_users() -> Vec<User> {
    let user = |id, name: &str, email: &str, role| User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role,
        is_active: true,
        created_at: Utc::now(),
    };
    vec![
        user(1, "Admin User", "admin@svgroup.edu", Role::Admin),
        user(2, "John Smith", "john@svgroup.edu", Role::Staff),
        user(3, "Sarah Johnson", "sarah@svgroup.edu", Role::Staff),
    ]
}

fn feedback(
    id: u64,
    student_id: u64,
    staff_id: StaffId,
    status: ContactStatus,
    remarks: &str,
) -> Feedback {
    let days_ago = i64::try_from(5 - id).unwrap_or(0);
    Feedback {
        id,
        student_id,
        staff_id,
        status,
        remarks: remarks.to_string(),
        timestamp: Utc::now() - Duration::days(days_ago),
    }
}

/// The seeded snapshot described in the module docs.
pub fn seeded_snapshot() -> Snapshot {
    use ContactStatus::{Contacted, Interested, NotInterested, Pending};

    Snapshot {
        students: vec![
            student(1, "Aarav Sharma", "9876543210", 1250, "OC", Some(2), Contacted),
            student(2, "Diya Patel", "9876543211", 2300, "BC-A", Some(2), Interested),
            Student {
                is_special: true,
                ..student(3, "Rohan Reddy", "9876543212", 850, "OC", Some(3), Pending)
            },
            student(4, "Priya Kumar", "9876543213", 3100, "SC", Some(3), NotInterested),
            student(5, "Vikram Singh", "9876543214", 4500, "OC", None, Pending),
        ],
        staff: sample_staff(),
        feedback: vec![
            feedback(
                1,
                1,
                2,
                Contacted,
                "Student contacted successfully. Showed interest in computer science programs.",
            ),
            feedback(
                2,
                2,
                2,
                Interested,
                "Very interested in engineering programs. Wants to visit campus.",
            ),
            feedback(3, 3, 3, Pending, "Unable to reach student. Will try again tomorrow."),
            feedback(
                4,
                4,
                3,
                NotInterested,
                "Student not interested in our programs. Looking for different field.",
            ),
        ],
    }
}

/// Repository over the seeded snapshot, plus a handle on its store.
pub fn seeded_repository() -> (Repository, MemoryStore) {
    let store = MemoryStore::with_snapshot(seeded_snapshot());
    (Repository::load(store.clone()), store)
}
