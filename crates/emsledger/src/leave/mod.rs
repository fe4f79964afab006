//! Leave request queue for emsledger.
//!
//! A fixed-capacity FIFO of leave requests backed by a [`RingBuffer`].
//! Requests get a [`LeaveId`] when enqueued; decisions and removals address
//! requests by that id.

mod request;
mod ring;

use parking_lot::Mutex;
use tracing::{debug, error, warn};

pub use request::{LeaveId, LeaveRequest, LeaveStatus};
pub use ring::RingBuffer;

/// Default capacity of the leave queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 500;

#[derive(Debug)]
struct State {
    buffer: RingBuffer<LeaveRequest>,
    next_id: u64,
}

/// Bounded FIFO of leave requests with an approval workflow.
#[derive(Debug)]
pub struct LeaveQueue {
    state: Mutex<State>,
}

impl Default for LeaveQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl LeaveQueue {
    /// Create an empty queue holding at most `capacity` requests.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(State {
                buffer: RingBuffer::new(capacity),
                next_id: 1,
            }),
        }
    }

    /// Add a request at the rear.
    ///
    /// Returns the id assigned to it, or `None` when the queue is full. Any
    /// id already on `request` is replaced.
    pub fn enqueue(&self, mut request: LeaveRequest) -> Option<LeaveId> {
        let mut state = self.state.lock();
        if state.buffer.is_full() {
            warn!(
                "Leave queue full ({} requests); rejected request from '{}'",
                state.buffer.capacity(),
                request.username
            );
            return None;
        }

        let id = LeaveId(state.next_id);
        request.id = Some(id);
        let username = request.username.clone();
        state.buffer.enqueue(request).ok()?;
        state.next_id += 1;

        debug!("Enqueued leave request {} from '{}'", id, username);
        Some(id)
    }

    /// Remove and return the oldest request.
    pub fn dequeue(&self) -> Option<LeaveRequest> {
        self.state.lock().buffer.dequeue()
    }

    /// Every queued request, oldest first.
    #[must_use]
    pub fn snapshot_fifo(&self) -> Vec<LeaveRequest> {
        self.state.lock().buffer.iter().cloned().collect()
    }

    /// Queued requests from one user, oldest first.
    #[must_use]
    pub fn snapshot_for_user(&self, username: &str) -> Vec<LeaveRequest> {
        self.state
            .lock()
            .buffer
            .iter()
            .filter(|r| r.username == username)
            .cloned()
            .collect()
    }

    /// The oldest request still pending, left in place.
    #[must_use]
    pub fn peek_next_pending(&self) -> Option<LeaveRequest> {
        self.state
            .lock()
            .buffer
            .iter()
            .find(|r| r.is_pending())
            .cloned()
    }

    /// Look up a queued request by id.
    #[must_use]
    pub fn get(&self, id: LeaveId) -> Option<LeaveRequest> {
        self.state
            .lock()
            .buffer
            .iter()
            .find(|r| r.id == Some(id))
            .cloned()
    }

    /// Set the status and remarks of a queued request.
    ///
    /// Missing remarks are stored as an empty string. Returns `false` if no
    /// queued request has `id`.
    pub fn update_decision(&self, id: LeaveId, status: LeaveStatus, remarks: Option<&str>) -> bool {
        let mut state = self.state.lock();
        let Some(request) = state.buffer.find_mut(|r| r.id == Some(id)) else {
            debug!("No queued leave request {} to update", id);
            return false;
        };

        request.status = status;
        request.remarks = remarks.unwrap_or_default().to_string();
        debug!("Leave request {} marked {}", id, status);
        true
    }

    /// [`LeaveQueue::update_decision`] with the status given as text.
    ///
    /// Returns `false` for a blank or unrecognised status.
    pub fn update_decision_str(&self, id: LeaveId, status: &str, remarks: Option<&str>) -> bool {
        if status.trim().is_empty() {
            return false;
        }
        match status.parse::<LeaveStatus>() {
            Ok(status) => self.update_decision(id, status, remarks),
            Err(e) => {
                warn!("Leave request {} not updated: {}", id, e);
                false
            }
        }
    }

    /// Remove one request while keeping the others in FIFO order.
    ///
    /// Every queued request is dequeued once; all but the first one matching
    /// `id` go back in at the rear. Returns `false` if the queue is empty or
    /// no request has `id`.
    pub fn remove(&self, id: LeaveId) -> bool {
        let mut state = self.state.lock();
        let count = state.buffer.len();
        let mut removed = false;

        for _ in 0..count {
            let Some(request) = state.buffer.dequeue() else {
                break;
            };
            if !removed && request.id == Some(id) {
                removed = true;
                continue;
            }
            if let Err(lost) = state.buffer.enqueue(request) {
                // Unreachable: the buffer holds fewer than `count` items here.
                error!("Leave request {:?} dropped while removing {}", lost.id, id);
            }
        }

        if removed {
            debug!("Removed leave request {}", id);
        }
        removed
    }

    /// Number of queued requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().buffer.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().buffer.is_empty()
    }

    /// Whether the queue is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.state.lock().buffer.is_full()
    }

    /// Maximum number of queued requests.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.state.lock().buffer.capacity()
    }

    /// Drop every queued request. Ids keep counting up.
    pub fn clear(&self) {
        self.state.lock().buffer.clear();
    }
}
