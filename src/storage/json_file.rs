//! File-backed persistence: one pretty-printed JSON file per collection.

use super::{Persistence, Snapshot};
use crate::{
    entities::User,
    errors::{Error, Result},
};
use serde::de::DeserializeOwned;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

const STUDENTS_FILE: &str = "students.json";
const STAFF_FILE: &str = "staff.json";
const FEEDBACK_FILE: &str = "feedback.json";
const USERS_FILE: &str = "users.json";

/// Stores the repository collections under a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `data_dir`. Nothing is touched until the first save.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory holding the JSON files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Reads `users.json` for the identity-backed staff directory.
    /// Missing or unreadable files yield an empty list.
    #[must_use]
    pub fn load_users(&self) -> Vec<User> {
        read_collection(&self.data_dir.join(USERS_FILE)).unwrap_or_else(|e| {
            warn!("Failed to load users, starting with none: {}", e);
            Vec::new()
        })
    }

    fn try_load(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            students: read_collection(&self.data_dir.join(STUDENTS_FILE))?,
            staff: read_collection(&self.data_dir.join(STAFF_FILE))?,
            feedback: read_collection(&self.data_dir.join(FEEDBACK_FILE))?,
        })
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&contents).map_err(|e| Error::Storage {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

impl Persistence for JsonFileStore {
    fn load(&self) -> Snapshot {
        match self.try_load() {
            Ok(snapshot) => {
                debug!(
                    "Loaded {} students, {} staff, {} feedback entries from {:?}",
                    snapshot.students.len(),
                    snapshot.staff.len(),
                    snapshot.feedback.len(),
                    self.data_dir
                );
                snapshot
            }
            Err(e) => {
                // One bad file discards everything so collections never disagree.
                warn!("Error loading stored data, starting empty: {}", e);
                Snapshot::default()
            }
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| Error::Storage {
            message: format!("Failed to create data dir {:?}: {e}", self.data_dir),
        })?;

        fs::write(
            self.data_dir.join(STUDENTS_FILE),
            serde_json::to_string_pretty(&snapshot.students)?,
        )?;
        fs::write(
            self.data_dir.join(STAFF_FILE),
            serde_json::to_string_pretty(&snapshot.staff)?,
        )?;
        fs::write(
            self.data_dir.join(FEEDBACK_FILE),
            serde_json::to_string_pretty(&snapshot.feedback)?,
        )?;
        Ok(())
    }
}
