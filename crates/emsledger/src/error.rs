//! Error types for emsledger.
//!
//! Business rejections (duplicate punch-in, full queue, unknown request) are
//! reported through `bool`/`Option` returns on the components themselves.
//! The variants here cover the unexpected faults: ledger file I/O and
//! configuration problems.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for emsledger operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Ledger Errors ===
    /// Appending a record line to the ledger file failed.
    #[error("failed to write ledger file {path}: {source}")]
    LedgerWrite {
        /// Path to the ledger file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Reading the ledger file failed.
    #[error("failed to read ledger file {path}: {source}")]
    LedgerRead {
        /// Path to the ledger file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Leave Errors ===
    /// A leave status string did not name a known status.
    #[error("invalid leave status: '{0}'")]
    InvalidStatus(String),

    // === I/O Errors ===
    /// Failed to create the ledger's parent directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for emsledger operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a ledger write error for the given path.
    #[must_use]
    pub fn ledger_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LedgerWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a ledger read error for the given path.
    #[must_use]
    pub fn ledger_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LedgerRead {
            path: path.into(),
            source,
        }
    }

    /// Check if this error came from ledger file I/O.
    #[must_use]
    pub fn is_ledger_io(&self) -> bool {
        matches!(
            self,
            Self::LedgerWrite { .. } | Self::LedgerRead { .. } | Self::DirectoryCreate { .. }
        )
    }
}
