//! `emsledger` - Record and state store for an employee administration tool
//!
//! This library provides the persistent user record ledger along with the
//! in-memory attendance, leave request and task state shared by the
//! administrator and employee front ends.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod attendance;
pub mod cli;
pub mod config;
pub mod error;
pub mod leave;
pub mod ledger;
pub mod logging;
pub mod store;
pub mod tasks;

pub use attendance::{AttendanceRecord, AttendanceTracker};
pub use config::Config;
pub use error::{Error, Result};
pub use leave::{LeaveId, LeaveQueue, LeaveRequest, LeaveStatus};
pub use ledger::{AdminRecord, EmployeeRecord, RecordLedger, Role, UserRecord};
pub use logging::init_logging;
pub use store::{Store, StoreStats};
pub use tasks::{Assignment, TaskDirectory};
