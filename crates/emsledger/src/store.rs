//! The store shared by every collaborator.
//!
//! [`Store`] owns one of each component and is handed out behind an `Arc`.
//! Only the ledger outlives the process; attendance, leave and task state
//! start empty on [`Store::new`] and are dropped by [`Store::close`].

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::attendance::AttendanceTracker;
use crate::config::Config;
use crate::error::Result;
use crate::leave::LeaveQueue;
use crate::ledger::RecordLedger;
use crate::tasks::TaskDirectory;

/// Record and state store for one running instance.
#[derive(Debug)]
pub struct Store {
    ledger: RecordLedger,
    attendance: AttendanceTracker,
    leave: LeaveQueue,
    tasks: TaskDirectory,
}

/// Counts across the store's components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Records known to the ledger's in-memory list.
    pub ledger_records: usize,
    /// Attendance records in the history.
    pub attendance_records: usize,
    /// Punch-ins not yet processed.
    pub attendance_unprocessed: usize,
    /// Leave requests in the queue.
    pub leave_requests: usize,
    /// Employees with saved tasks or remarks.
    pub assignments: usize,
}

impl Store {
    /// Build a store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, or if
    /// `ledger.load_on_open` is set and the ledger file cannot be read.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let ledger = if config.ledger.load_on_open {
            RecordLedger::open_and_load(&config.ledger.path)?
        } else {
            RecordLedger::open(&config.ledger.path)
        };

        info!("Store opened with ledger at {}", ledger.path().display());
        Ok(Self {
            ledger,
            attendance: AttendanceTracker::new(config.attendance.stack_capacity),
            leave: LeaveQueue::new(config.leave.queue_capacity),
            tasks: TaskDirectory::new(),
        })
    }

    /// Build a store ready to be shared between threads.
    ///
    /// # Errors
    ///
    /// See [`Store::new`].
    pub fn shared(config: &Config) -> Result<Arc<Self>> {
        Self::new(config).map(Arc::new)
    }

    /// The user record ledger.
    #[must_use]
    pub fn ledger(&self) -> &RecordLedger {
        &self.ledger
    }

    /// The attendance tracker.
    #[must_use]
    pub fn attendance(&self) -> &AttendanceTracker {
        &self.attendance
    }

    /// The leave request queue.
    #[must_use]
    pub fn leave(&self) -> &LeaveQueue {
        &self.leave
    }

    /// The task and remarks directory.
    #[must_use]
    pub fn tasks(&self) -> &TaskDirectory {
        &self.tasks
    }

    /// Current counts.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            ledger_records: self.ledger.len(),
            attendance_records: self.attendance.len(),
            attendance_unprocessed: self.attendance.queue_len(),
            leave_requests: self.leave.len(),
            assignments: self.tasks.len(),
        }
    }

    /// Tear down the in-memory state.
    ///
    /// Attendance, leave and task state is discarded; the ledger file is
    /// untouched. Returns the counts as they stood before closing.
    pub fn close(&self) -> StoreStats {
        let stats = self.stats();
        self.attendance.clear();
        self.leave.clear();
        self.tasks.clear();
        info!(
            "Store closed: {} attendance records, {} leave requests, {} assignments discarded",
            stats.attendance_records, stats.leave_requests, stats.assignments
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ledger::AdminRecord;
    use chrono::{NaiveDate, NaiveTime};

    fn create_test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let config = Config::with_ledger_path(dir.path().join("users.txt"));
        let store = Store::new(&config).expect("failed to create store");
        (dir, store)
    }

    #[test]
    fn test_new_store_is_empty() {
        let (_dir, store) = create_test_store();
        let stats = store.stats();

        assert_eq!(stats.ledger_records, 0);
        assert_eq!(stats.attendance_records, 0);
        assert_eq!(stats.leave_requests, 0);
        assert_eq!(stats.assignments, 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = Config::default();
        config.leave.queue_capacity = 0;
        assert!(Store::new(&config).is_err());
    }

    #[test]
    fn test_new_rejects_oversized_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_ledger_path(dir.path().join("users.txt"));
        config.attendance.stack_capacity = usize::MAX;

        let result = Store::new(&config);
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_capacities_come_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_ledger_path(dir.path().join("users.txt"));
        config.leave.queue_capacity = 7;
        let store = Store::new(&config).unwrap();

        assert_eq!(store.leave().capacity(), 7);
    }

    #[test]
    fn test_load_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.txt");
        let first = Store::new(&Config::with_ledger_path(&path)).unwrap();
        first
            .ledger()
            .append_admin(AdminRecord {
                name: "Root".to_string(),
                username: "root".to_string(),
                email: String::new(),
                password: "pw1".to_string(),
            })
            .unwrap();

        let mut config = Config::with_ledger_path(&path);
        let cold = Store::new(&config).unwrap();
        assert_eq!(cold.stats().ledger_records, 0);

        config.ledger.load_on_open = true;
        let warm = Store::new(&config).unwrap();
        assert_eq!(warm.stats().ledger_records, 1);
    }

    #[test]
    fn test_close_discards_volatile_state() {
        let (_dir, store) = create_test_store();
        let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        store.attendance().punch_in("alice", date, time);
        store.tasks().save("alice", ["review"], None);

        let before = store.close();
        assert_eq!(before.attendance_records, 1);
        assert_eq!(before.attendance_unprocessed, 1);
        assert_eq!(before.assignments, 1);

        let after = store.stats();
        assert_eq!(after.attendance_records, 0);
        assert_eq!(after.assignments, 0);
    }
}
