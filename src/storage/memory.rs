//! In-memory persistence. Clones share the same backing cell, so a test can
//! keep a handle and inspect what the repository saved.

use super::{Persistence, Snapshot};
use crate::errors::{Error, Result};
use std::{cell::RefCell, rc::Rc};

#[derive(Debug, Default)]
struct Inner {
    snapshot: Snapshot,
    save_count: usize,
    fail_saves: bool,
}

/// Shared in-memory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that starts out holding `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().snapshot = snapshot;
        store
    }

    /// Last saved (or seeded) snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.inner.borrow().snapshot.clone()
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.inner.borrow().save_count
    }

    /// Makes every following save fail, as a full or unavailable disk would.
    pub fn set_fail_saves(&self, fail: bool) {
        self.inner.borrow_mut().fail_saves = fail;
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> Snapshot {
        self.snapshot()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_saves {
            return Err(Error::Storage {
                message: "memory store is configured to reject writes".to_string(),
            });
        }
        inner.snapshot = snapshot.clone();
        inner.save_count += 1;
        Ok(())
    }
}
