//! Entity module - plain value records held by the repository.
//! Records are cloned out and replaced wholesale on update, never mutated in
//! place through shared references.

pub mod feedback;
pub mod staff;
pub mod status;
pub mod student;
pub mod user;

// Re-export specific types to avoid long paths at call sites
pub use feedback::{Feedback, FeedbackId};
pub use staff::{Staff, StaffId};
pub use status::ContactStatus;
pub use student::{NewStudent, Student, StudentId, StudentUpdate};
pub use user::{Role, User};
