//! Leave request types.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Error;

/// Identifier assigned to a request when it is enqueued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LeaveId(pub u64);

impl std::fmt::Display for LeaveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Decision state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LeaveStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Approved by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Approved => write!(f, "Approved"),
            Self::Rejected => write!(f, "Rejected"),
        }
    }
}

impl FromStr for LeaveStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// A request for leave from one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveRequest {
    /// Set by the queue on enqueue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<LeaveId>,
    /// Requesting employee.
    pub username: String,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave.
    pub to_date: NaiveDate,
    /// Kind of leave, e.g. "Sick" or "Annual".
    pub leave_type: String,
    /// Employee's stated reason.
    pub reason: String,
    /// Current decision.
    pub status: LeaveStatus,
    /// Administrator's remarks on the decision.
    pub remarks: String,
}

impl LeaveRequest {
    /// Create a pending request with no remarks.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        from_date: NaiveDate,
        to_date: NaiveDate,
        leave_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            from_date,
            to_date,
            leave_type: leave_type.into(),
            reason: reason.into(),
            status: LeaveStatus::Pending,
            remarks: String::new(),
        }
    }

    /// Whether the request still awaits a decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }
}
