//! Attendance tracking for emsledger.
//!
//! Each (username, date) pair moves through `NoRecord -> PunchedIn ->
//! PunchedOut`. Punch-ins are kept in three places at once:
//!
//! - the full history, oldest first;
//! - a FIFO processing queue, consumed by [`AttendanceTracker::process_next`];
//! - a bounded LIFO stack used for newest-first display.
//!
//! The queue and stack hold indices into the history, so a punch-out is
//! visible from every view. All three move together under one lock.

mod stack;

use std::collections::VecDeque;

use chrono::{NaiveDate, NaiveTime};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

pub use stack::BoundedStack;

/// Default capacity of the display stack.
pub const DEFAULT_STACK_CAPACITY: usize = 2000;

/// One user's attendance for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    /// Who punched in.
    pub username: String,
    /// The day the record belongs to.
    pub date: NaiveDate,
    /// Punch-in time.
    pub punch_in: NaiveTime,
    /// Punch-out time, once set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub punch_out: Option<NaiveTime>,
}

impl AttendanceRecord {
    /// Create a punched-in record.
    #[must_use]
    pub fn new(username: impl Into<String>, date: NaiveDate, punch_in: NaiveTime) -> Self {
        Self {
            username: username.into(),
            date,
            punch_in,
            punch_out: None,
        }
    }

    /// Whether this record is for `username` on `date`.
    #[must_use]
    pub fn is_for(&self, username: &str, date: NaiveDate) -> bool {
        self.username == username && self.date == date
    }

    /// Whether the punch-out has been recorded.
    #[must_use]
    pub fn is_punched_out(&self) -> bool {
        self.punch_out.is_some()
    }
}

#[derive(Debug)]
struct State {
    history: Vec<AttendanceRecord>,
    queue: VecDeque<usize>,
    stack: BoundedStack<usize>,
}

/// Punch-in/punch-out tracker with FIFO and LIFO views.
#[derive(Debug)]
pub struct AttendanceTracker {
    state: Mutex<State>,
}

impl Default for AttendanceTracker {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_CAPACITY)
    }
}

impl AttendanceTracker {
    /// Create a tracker whose display stack holds `stack_capacity` entries.
    #[must_use]
    pub fn new(stack_capacity: usize) -> Self {
        Self {
            state: Mutex::new(State {
                history: Vec::new(),
                queue: VecDeque::new(),
                stack: BoundedStack::new(stack_capacity),
            }),
        }
    }

    /// Record a punch-in.
    ///
    /// Returns `false` if `username` is blank or the user already has a
    /// record for `date`. A full display stack does not reject the punch-in.
    pub fn punch_in(&self, username: &str, date: NaiveDate, time: NaiveTime) -> bool {
        if username.trim().is_empty() {
            return false;
        }

        let mut state = self.state.lock();
        if state.history.iter().any(|r| r.is_for(username, date)) {
            debug!("Rejected second punch-in for '{}' on {}", username, date);
            return false;
        }

        let index = state.history.len();
        state.history.push(AttendanceRecord::new(username, date, time));
        state.queue.push_back(index);
        if !state.stack.push(index) {
            warn!(
                "Attendance stack full ({} entries); '{}' on {} not shown",
                state.stack.capacity(),
                username,
                date
            );
        }

        debug!("Punch-in for '{}' on {} at {}", username, date, time);
        true
    }

    /// Record a punch-out on the newest record for (username, date).
    ///
    /// Returns `false` if `username` is blank, there was no punch-in, or the
    /// punch-out is already set.
    pub fn punch_out(&self, username: &str, date: NaiveDate, time: NaiveTime) -> bool {
        if username.trim().is_empty() {
            return false;
        }

        let mut state = self.state.lock();
        let Some(record) = state
            .history
            .iter_mut()
            .rev()
            .find(|r| r.is_for(username, date))
        else {
            debug!("Rejected punch-out for '{}' on {}: no punch-in", username, date);
            return false;
        };

        if record.is_punched_out() {
            debug!("Rejected second punch-out for '{}' on {}", username, date);
            return false;
        }

        record.punch_out = Some(time);
        debug!("Punch-out for '{}' on {} at {}", username, date, time);
        true
    }

    /// Take the oldest unprocessed punch-in.
    ///
    /// Leaves the history and the display stack untouched.
    pub fn process_next(&self) -> Option<AttendanceRecord> {
        let mut state = self.state.lock();
        let index = state.queue.pop_front()?;
        state.history.get(index).cloned()
    }

    /// Punch-ins on the display stack, newest first.
    #[must_use]
    pub fn stack_view(&self) -> Vec<AttendanceRecord> {
        let state = self.state.lock();
        state
            .stack
            .iter_newest_first()
            .filter_map(|&i| state.history.get(i).cloned())
            .collect()
    }

    /// Every record, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<AttendanceRecord> {
        self.state.lock().history.clone()
    }

    /// The newest entry on the display stack.
    #[must_use]
    pub fn peek_last_punch_in(&self) -> Option<AttendanceRecord> {
        let state = self.state.lock();
        state
            .stack
            .peek()
            .and_then(|&i| state.history.get(i).cloned())
    }

    /// Remove the newest entry from the display stack.
    ///
    /// The record stays in the history and, if unprocessed, in the queue.
    pub fn pop_last_punch_in(&self) -> Option<AttendanceRecord> {
        let mut state = self.state.lock();
        let index = state.stack.pop()?;
        state.history.get(index).cloned()
    }

    /// Number of punch-ins waiting in the processing queue.
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Number of entries on the display stack.
    #[must_use]
    pub fn stack_len(&self) -> usize {
        self.state.lock().stack.len()
    }

    /// Number of records in the history.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().history.len()
    }

    /// Whether no punch-in has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().history.is_empty()
    }

    /// Drop all attendance state.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.history.clear();
        state.queue.clear();
        state.stack.clear();
    }
}
