//! Persistence collaborator - durable copy of the repository's collections.
//!
//! The repository treats storage as best-effort: loading never fails (missing
//! or unreadable data degrades to empty collections) and a failed save is
//! logged by the caller while the in-memory state stays authoritative.

/// JSON files in a data directory
pub mod json_file;
/// In-memory store for tests and throwaway sessions
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::{
    entities::{Feedback, Staff, Student},
    errors::Result,
};
use serde::{Deserialize, Serialize};

/// The three collections the repository persists together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Roster
    pub students: Vec<Student>,
    /// Locally known staff
    pub staff: Vec<Staff>,
    /// Append-only contact log
    pub feedback: Vec<Feedback>,
}

/// Durable storage for a [`Snapshot`].
pub trait Persistence {
    /// Reads the stored collections, falling back to empty ones on absence or corruption.
    fn load(&self) -> Snapshot;

    /// Writes all three collections.
    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;
}
