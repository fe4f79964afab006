//! Per-employee task lists and weekly remarks.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

/// Tasks and remarks stored for one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Assigned tasks, in the order given.
    pub tasks: Vec<String>,
    /// Weekly remarks.
    pub remarks: String,
}

/// Directory of assignments keyed by trimmed, lower-cased username.
#[derive(Debug, Default)]
pub struct TaskDirectory {
    entries: Mutex<HashMap<String, Assignment>>,
}

fn normalize(username: &str) -> Option<String> {
    let key = username.trim();
    (!key.is_empty()).then(|| key.to_lowercase())
}

impl TaskDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tasks and remarks stored for `username`.
    ///
    /// Tasks are trimmed and blank ones dropped; remarks are trimmed, with
    /// `None` stored as empty. A blank username is ignored.
    pub fn save<I, S>(&self, username: &str, tasks: I, remarks: Option<&str>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(key) = normalize(username) else {
            return;
        };

        let assignment = Assignment {
            tasks: tasks
                .into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            remarks: remarks.map(str::trim).unwrap_or_default().to_string(),
        };

        debug!("Saved {} tasks for '{}'", assignment.tasks.len(), key);
        self.entries.lock().insert(key, assignment);
    }

    /// Tasks stored for `username`; empty when there are none.
    #[must_use]
    pub fn tasks(&self, username: &str) -> Vec<String> {
        self.assignment(username).tasks
    }

    /// Remarks stored for `username`; empty when there are none.
    #[must_use]
    pub fn remarks(&self, username: &str) -> String {
        self.assignment(username).remarks
    }

    /// Everything stored for `username`; default when there is nothing.
    #[must_use]
    pub fn assignment(&self, username: &str) -> Assignment {
        normalize(username)
            .and_then(|key| self.entries.lock().get(&key).cloned())
            .unwrap_or_default()
    }

    /// Number of employees with an assignment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing has been saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every assignment.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
