//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::ledger::{AdminRecord, EmployeeRecord};

/// Account registration commands.
#[derive(Debug, Subcommand)]
pub enum RegisterCommand {
    /// Register an administrator
    Admin {
        /// Display name
        #[arg(long)]
        name: String,

        /// Login name
        #[arg(short, long)]
        username: String,

        /// Contact email
        #[arg(short, long, default_value = "")]
        email: String,

        /// Password (stored as given)
        #[arg(short, long)]
        password: String,
    },

    /// Register an employee
    Employee {
        /// Full name
        #[arg(long)]
        full_name: String,

        /// Login name
        #[arg(short, long)]
        username: String,

        /// Contact email
        #[arg(short, long, default_value = "")]
        email: String,

        /// Contact phone number
        #[arg(long, default_value = "")]
        phone: String,

        /// Department
        #[arg(short, long, default_value = "")]
        department: String,

        /// Employment type, e.g. "Full-time"
        #[arg(short = 't', long, default_value = "")]
        employee_type: String,

        /// Postal address
        #[arg(short, long, default_value = "")]
        address: String,

        /// Password (stored as given)
        #[arg(short, long)]
        password: String,
    },
}

impl RegisterCommand {
    /// Username being registered.
    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::Admin { username, .. } | Self::Employee { username, .. } => username,
        }
    }
}

impl From<RegisterCommand> for crate::ledger::UserRecord {
    fn from(cmd: RegisterCommand) -> Self {
        match cmd {
            RegisterCommand::Admin {
                name,
                username,
                email,
                password,
            } => Self::Admin(AdminRecord {
                name,
                username,
                email,
                password,
            }),
            RegisterCommand::Employee {
                full_name,
                username,
                email,
                phone,
                department,
                employee_type,
                address,
                password,
            } => Self::Employee(EmployeeRecord {
                full_name,
                username,
                email,
                phone,
                department,
                employee_type,
                address,
                password,
            }),
        }
    }
}

/// Exists command arguments.
#[derive(Debug, Args)]
pub struct ExistsCommand {
    /// Username to look up
    pub username: String,
}

/// Login command arguments.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Username to authenticate
    pub username: String,

    /// Password to check
    pub password: String,
}

/// Users command arguments.
#[derive(Debug, Args)]
pub struct UsersCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        file: Option<PathBuf>,
    },
}
