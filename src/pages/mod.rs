pub mod checklist;
pub mod credits;
pub mod home;
pub mod login;
pub mod mypage;
pub mod score_management;
pub mod summary;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// What a row is waiting on while its request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Adding,
    Removing,
    Updating,
}

/// Result of a row action that was allowed to run, or why it did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// The row is already in the target state; nothing was sent.
    Unchanged,
    /// Another request for the same row is still in flight.
    Busy,
}

/// Per-row in-flight tracking, so only the affected row's button is disabled.
#[derive(Debug, Default)]
pub struct PendingRows {
    rows: Mutex<HashMap<String, RowAction>>,
}

impl PendingRows {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, RowAction>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, id: &str) -> Option<RowAction> {
        self.lock().get(id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Marks `id` busy until the returned guard drops; `None` if it already is.
    pub fn begin(&self, id: &str, action: RowAction) -> Option<PendingGuard<'_>> {
        let mut rows = self.lock();
        if rows.contains_key(id) {
            return None;
        }
        rows.insert(id.to_string(), action);
        Some(PendingGuard {
            owner: self,
            id: id.to_string(),
        })
    }
}

pub struct PendingGuard<'a> {
    owner: &'a PendingRows,
    id: String,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.owner.lock().remove(&self.id);
    }
}
