//! Configuration management for emsledger.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config dir.
const CONFIG_DIR_NAME: &str = "emsledger";

/// Default ledger file, resolved against the working directory.
const LEDGER_FILE_NAME: &str = "users.txt";

/// Largest accepted stack or queue capacity.
pub const MAX_CAPACITY: usize = 1_000_000;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `EMS_`, `__` between sections)
/// 2. TOML config file at `~/.config/emsledger/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record ledger configuration.
    pub ledger: LedgerConfig,
    /// Attendance tracker configuration.
    pub attendance: AttendanceConfig,
    /// Leave request queue configuration.
    pub leave: LeaveConfig,
}

/// Record ledger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Path to the user record file. Relative paths resolve against the
    /// process working directory.
    pub path: PathBuf,
    /// Read existing records into memory when the ledger is opened.
    pub load_on_open: bool,
}

/// Attendance tracker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceConfig {
    /// Fixed capacity of the punch-in display stack.
    pub stack_capacity: usize,
}

/// Leave request queue configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveConfig {
    /// Fixed capacity of the leave request ring buffer.
    pub queue_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(LEDGER_FILE_NAME),
            load_on_open: false,
        }
    }
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            stack_capacity: 2000,
        }
    }
}

impl Default for LeaveConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 500,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("EMS_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.ledger.path.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                message: "ledger.path must not be empty".to_string(),
            });
        }

        check_capacity("attendance.stack_capacity", self.attendance.stack_capacity)?;
        check_capacity("leave.queue_capacity", self.leave.queue_capacity)?;

        Ok(())
    }

    /// Get the ledger file path.
    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.ledger.path.clone()
    }

    /// Build a configuration whose ledger lives at `path`, everything else
    /// defaulted. Handy for collaborators and tests that manage their own
    /// data directory.
    #[must_use]
    pub fn with_ledger_path(path: impl Into<PathBuf>) -> Self {
        Self {
            ledger: LedgerConfig {
                path: path.into(),
                ..LedgerConfig::default()
            },
            ..Self::default()
        }
    }
}

fn check_capacity(key: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(Error::ConfigValidation {
            message: format!("{key} must be greater than 0"),
        });
    }
    if value > MAX_CAPACITY {
        return Err(Error::ConfigValidation {
            message: format!("{key} must be at most {MAX_CAPACITY}, got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.ledger.path, PathBuf::from("users.txt"));
        assert!(!config.ledger.load_on_open);
        assert_eq!(config.attendance.stack_capacity, 2000);
        assert_eq!(config.leave.queue_capacity, 500);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_ledger_path() {
        let mut config = Config::default();
        config.ledger.path = PathBuf::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("ledger.path"));
    }

    #[test]
    fn test_validate_zero_stack_capacity() {
        let mut config = Config::default();
        config.attendance.stack_capacity = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("stack_capacity"));
    }

    #[test]
    fn test_validate_zero_queue_capacity() {
        let mut config = Config::default();
        config.leave.queue_capacity = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("queue_capacity"));
    }

    #[test]
    fn test_validate_capacity_upper_bound() {
        let mut config = Config::default();
        config.attendance.stack_capacity = usize::MAX;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("attendance.stack_capacity"));
        assert!(err.contains("at most"));

        let mut config = Config::default();
        config.leave.queue_capacity = MAX_CAPACITY + 1;
        assert!(matches!(
            config.validate(),
            Err(Error::ConfigValidation { .. })
        ));

        config.leave.queue_capacity = MAX_CAPACITY;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[leave]\nqueue_capacity = 0\n").unwrap();

        let result = Config::load_from(Some(path));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_with_ledger_path() {
        let config = Config::with_ledger_path("/tmp/ems/users.txt");
        assert_eq!(config.ledger_path(), PathBuf::from("/tmp/ems/users.txt"));
        assert_eq!(config.leave, LeaveConfig::default());
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("emsledger"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[ledger]\npath = \"data/people.txt\"\n\n[leave]\nqueue_capacity = 8\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.ledger.path, PathBuf::from("data/people.txt"));
        assert_eq!(config.leave.queue_capacity, 8);
        assert_eq!(config.attendance.stack_capacity, 2000);
    }

    #[test]
    fn test_load_rejects_invalid_toml_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[attendance]\nstack_capacity = 0\n").unwrap();

        let result = Config::load_from(Some(path));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("load_on_open"));
        assert!(json.contains("queue_capacity"));
    }

    #[test]
    fn test_leave_config_deserialize() {
        let json = r#"{"queue_capacity": 3}"#;
        let leave: LeaveConfig = serde_json::from_str(json).unwrap();
        assert_eq!(leave.queue_capacity, 3);
    }
}
