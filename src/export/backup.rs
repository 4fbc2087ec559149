//! Full JSON backup of the repository and restore from one.

use crate::{
    core::Repository,
    entities::{Feedback, Staff, Student},
    errors::{Error, Result},
    storage::Snapshot,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Format version written into new backups.
pub const BACKUP_VERSION: &str = "1.0.0";

/// Backup file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Roster
    pub students: Vec<Student>,
    /// Locally known staff
    pub staff: Vec<Staff>,
    /// Contact log
    pub feedback: Vec<Feedback>,
    /// When the backup was taken
    pub exported_at: DateTime<Utc>,
    /// Backup format version
    pub version: String,
}

/// Lenient shape used to tell a missing collection apart from an empty one.
#[derive(Deserialize)]
struct IncomingBackup {
    students: Option<Vec<Student>>,
    staff: Option<Vec<Staff>>,
    feedback: Option<Vec<Feedback>>,
}

impl Backup {
    /// Captures the repository as it is now.
    #[must_use]
    pub fn capture(repository: &Repository) -> Self {
        let Snapshot {
            students,
            staff,
            feedback,
        } = repository.snapshot();
        Self {
            students,
            staff,
            feedback,
            exported_at: Utc::now(),
            version: BACKUP_VERSION.to_string(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses backup JSON into a snapshot ready for [`Repository::replace_all`].
    ///
    /// # Errors
    /// Returns [`Error::Storage`] when any of the three collections is absent
    /// and [`Error::Json`] when the payload is not valid JSON of that shape.
    pub fn parse(json: &str) -> Result<Snapshot> {
        let incoming: IncomingBackup = serde_json::from_str(json)?;
        match (incoming.students, incoming.staff, incoming.feedback) {
            (Some(students), Some(staff), Some(feedback)) => Ok(Snapshot {
                students,
                staff,
                feedback,
            }),
            _ => Err(Error::Storage {
                message: "Invalid data format: backup must contain students, staff and feedback"
                    .to_string(),
            }),
        }
    }

    /// Replaces the repository contents with a parsed backup.
    ///
    /// # Errors
    /// Propagates [`Backup::parse`] errors; the repository is untouched on error.
    pub fn restore(repository: &mut Repository, json: &str) -> Result<()> {
        let snapshot = Self::parse(json)?;
        info!(
            "Restoring backup: {} students, {} staff, {} feedback entries",
            snapshot.students.len(),
            snapshot.staff.len(),
            snapshot.feedback.len()
        );
        repository.replace_all(snapshot);
        Ok(())
    }
}
