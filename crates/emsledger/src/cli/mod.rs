//! Command-line interface for emsledger.
//!
//! This module provides the CLI structure for the `emsctl` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, ExistsCommand, LoginCommand, RegisterCommand, StatusCommand, UsersCommand,
};

use crate::logging::Verbosity;

/// emsctl - Manage the employee record ledger
///
/// Registers administrator and employee accounts in the ledger file and
/// checks credentials against it.
#[derive(Debug, Parser)]
#[command(name = "emsctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the ledger file location
    #[arg(short, long, global = true, value_name = "FILE")]
    pub ledger: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new account
    #[command(subcommand)]
    Register(RegisterCommand),

    /// Check whether a username is taken
    Exists(ExistsCommand),

    /// Check credentials and print the account role
    Login(LoginCommand),

    /// List the accounts in the ledger file
    Users(UsersCommand),

    /// Show ledger status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
