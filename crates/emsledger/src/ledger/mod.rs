//! Record ledger for emsledger.
//!
//! An append-only text file of user records plus the in-memory list of the
//! records this process has appended (or reloaded). Existence checks and
//! authentication scan the file line by line looking for quoted
//! `"key":"value"` markers; nothing is fully deserialized on those paths.
//!
//! The in-memory list and the file are not kept atomic with each other: a
//! record is pushed to memory before its line is written, and a failed write
//! leaves it in memory only. The failure is logged and returned.

pub mod format;
pub mod record;

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub use record::{AdminRecord, EmployeeRecord, Role, UserRecord};

/// Append-only user record store.
///
/// Every mutation holds the ledger lock for its full duration, so
/// [`RecordLedger::register`] cannot race another registration of the same
/// username within this process.
#[derive(Debug)]
pub struct RecordLedger {
    /// Path to the ledger file.
    path: PathBuf,
    /// Records known to this process.
    records: Mutex<Vec<UserRecord>>,
}

impl RecordLedger {
    /// Open a ledger backed by `path`.
    ///
    /// No I/O happens here; the file is created by the first append. The
    /// in-memory list starts empty.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        debug!("Opening ledger at {}", path.display());
        Self {
            path,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Open a ledger and load every record already in the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open_and_load(path: impl AsRef<Path>) -> Result<Self> {
        let ledger = Self::open(path);
        ledger.reload()?;
        Ok(ledger)
    }

    /// Get the path to the ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether a username is taken.
    ///
    /// Matches the in-memory records case-insensitively, then scans the file
    /// for the exact `"username":"…"` marker. A read failure is logged and
    /// reported as `false`.
    #[must_use]
    pub fn exists(&self, username: &str) -> bool {
        let records = self.records.lock();
        self.exists_locked(&records, username)
    }

    fn exists_locked(&self, records: &[UserRecord], username: &str) -> bool {
        if records.iter().any(|r| r.has_username(username)) {
            return true;
        }

        let needle = format::marker("username", username);
        match scan_lines(&self.path, |line| line.contains(&needle).then_some(())) {
            Ok(found) => found.is_some(),
            Err(e) => {
                warn!("Existence check on {} failed: {}", self.path.display(), e);
                false
            }
        }
    }

    /// Append a record to memory and to the ledger file.
    ///
    /// Does not check for duplicates; see [`RecordLedger::register`].
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// line cannot be written. The record stays in memory in that case.
    pub fn append(&self, record: impl Into<UserRecord>) -> Result<()> {
        let mut records = self.records.lock();
        self.append_locked(&mut records, record.into())
    }

    fn append_locked(&self, records: &mut Vec<UserRecord>, record: UserRecord) -> Result<()> {
        let line = format::to_line(&record);
        let username = record.username().to_string();
        records.push(record);

        if let Err(e) = write_line(&self.path, &line) {
            warn!(
                "Record for '{}' kept in memory but not written to {}: {}",
                username,
                self.path.display(),
                e
            );
            return Err(e);
        }

        debug!("Appended record for '{}'", username);
        Ok(())
    }

    /// Append an administrator record.
    ///
    /// # Errors
    ///
    /// See [`RecordLedger::append`].
    pub fn append_admin(&self, admin: AdminRecord) -> Result<()> {
        self.append(admin)
    }

    /// Append an employee record.
    ///
    /// # Errors
    ///
    /// See [`RecordLedger::append`].
    pub fn append_employee(&self, employee: EmployeeRecord) -> Result<()> {
        self.append(employee)
    }

    /// Append a record unless its username is already taken.
    ///
    /// The existence check and the append happen under one lock. Returns
    /// `Ok(false)` for a duplicate username.
    ///
    /// # Errors
    ///
    /// See [`RecordLedger::append`].
    pub fn register(&self, record: impl Into<UserRecord>) -> Result<bool> {
        let record = record.into();
        let mut records = self.records.lock();

        if self.exists_locked(&records, record.username()) {
            info!("Rejected registration of taken username '{}'", record.username());
            return Ok(false);
        }

        self.append_locked(&mut records, record)?;
        Ok(true)
    }

    /// Check credentials against the ledger file.
    ///
    /// The first line containing both the username and the password marker
    /// decides the role. Returns `None` when no line matches, the file does
    /// not exist, or it cannot be read.
    #[must_use]
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Role> {
        let _guard = self.records.lock();
        let user_marker = format::marker("username", username);
        let pass_marker = format::marker("password", password);

        let result = scan_lines(&self.path, |line| {
            if !(line.contains(&user_marker) && line.contains(&pass_marker)) {
                return None;
            }
            if line.contains(format::ADMIN_ROLE_MARKER) {
                Some(Role::Admin)
            } else if line.contains(format::EMPLOYEE_ROLE_MARKER) {
                Some(Role::Employee)
            } else {
                Some(Role::Unknown)
            }
        });

        match result {
            Ok(role) => {
                debug!("Authentication for '{}': {:?}", username, role);
                role
            }
            Err(e) => {
                warn!("Authentication read of {} failed: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Replace the in-memory records with the contents of the file.
    ///
    /// Lines that do not parse as records are skipped with a warning. A
    /// missing file yields an empty ledger. Returns the number of records
    /// loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn reload(&self) -> Result<usize> {
        let mut records = self.records.lock();
        let mut loaded = Vec::new();

        let file = match File::open(&self.path) {
            Ok(file) => Some(file),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(Error::ledger_read(&self.path, e)),
        };

        if let Some(file) = file {
            for (index, line) in BufReader::new(file).lines().enumerate() {
                let line = line.map_err(|e| Error::ledger_read(&self.path, e))?;
                if line.trim().is_empty() {
                    continue;
                }
                match format::from_line(&line) {
                    Some(record) => loaded.push(record),
                    None => warn!(
                        "Skipping malformed line {} in {}",
                        index + 1,
                        self.path.display()
                    ),
                }
            }
        }

        let count = loaded.len();
        *records = loaded;
        info!("Loaded {} records from {}", count, self.path.display());
        Ok(count)
    }

    /// Snapshot of every record known to this process.
    #[must_use]
    pub fn records(&self) -> Vec<UserRecord> {
        self.records.lock().clone()
    }

    /// Snapshot of the administrator records known to this process.
    #[must_use]
    pub fn admins(&self) -> Vec<AdminRecord> {
        self.records
            .lock()
            .iter()
            .filter_map(|r| match r {
                UserRecord::Admin(admin) => Some(admin.clone()),
                UserRecord::Employee(_) => None,
            })
            .collect()
    }

    /// Snapshot of the employee records known to this process.
    #[must_use]
    pub fn employees(&self) -> Vec<EmployeeRecord> {
        self.records
            .lock()
            .iter()
            .filter_map(|r| match r {
                UserRecord::Employee(employee) => Some(employee.clone()),
                UserRecord::Admin(_) => None,
            })
            .collect()
    }

    /// Number of records known to this process.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether this process knows of no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

/// Run `f` over each line of the file until it returns `Some`.
///
/// A missing file is not an error and yields `Ok(None)`.
fn scan_lines<T>(path: &Path, mut f: impl FnMut(&str) -> Option<T>) -> io::Result<Option<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    for line in BufReader::new(file).lines() {
        if let Some(found) = f(&line?) {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Open the file in append mode, write one line, close it.
fn write_line(path: &Path, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::ledger_write(path, e))?;
    file.write_all(format!("{line}\n").as_bytes())
        .map_err(|e| Error::ledger_write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_ledger() -> (TempDir, RecordLedger) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let ledger = RecordLedger::open(dir.path().join("users.txt"));
        (dir, ledger)
    }

    fn admin(username: &str, password: &str) -> AdminRecord {
        AdminRecord {
            name: "Admin".to_string(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: password.to_string(),
        }
    }

    fn employee(username: &str, password: &str) -> EmployeeRecord {
        EmployeeRecord {
            full_name: "Employee".to_string(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            phone: "555-0100".to_string(),
            department: "Ops".to_string(),
            employee_type: "Full-time".to_string(),
            address: "1 Main St".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_open_does_not_create_file() {
        let (_dir, ledger) = create_test_ledger();
        assert!(!ledger.path().exists());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_exists_after_append_ignores_case() {
        let (_dir, ledger) = create_test_ledger();
        ledger.append_admin(admin("Root", "pw1")).unwrap();

        assert!(ledger.exists("Root"));
        assert!(ledger.exists("root"));
        assert!(ledger.exists("ROOT"));
        assert!(!ledger.exists("other"));
    }

    #[test]
    fn test_exists_missing_file() {
        let (_dir, ledger) = create_test_ledger();
        assert!(!ledger.exists("anyone"));
    }

    #[test]
    fn test_exists_sees_records_from_other_instance() {
        let (dir, ledger) = create_test_ledger();
        ledger.append_employee(employee("alice", "pw")).unwrap();

        let other = RecordLedger::open(dir.path().join("users.txt"));
        assert!(other.is_empty());
        assert!(other.exists("alice"));
        // The file scan is an exact marker match.
        assert!(!other.exists("ALICE"));
    }

    #[test]
    fn test_append_writes_one_line_per_record() {
        let (_dir, ledger) = create_test_ledger();
        ledger.append_admin(admin("root", "pw1")).unwrap();
        ledger.append_employee(employee("alice", "pw2")).unwrap();

        let contents = std::fs::read_to_string(ledger.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"role":"admin","name":"Admin","username":"root""#));
        assert!(lines[1].starts_with(r#"{"role":"employee","fullName":"Employee""#));
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_append_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("users.txt");
        let ledger = RecordLedger::open(&path);

        ledger.append_admin(admin("root", "pw1")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_append_failure_keeps_record_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the open fail.
        let path = dir.path().join("users.txt");
        std::fs::create_dir(&path).unwrap();
        let ledger = RecordLedger::open(&path);

        let result = ledger.append_admin(admin("root", "pw1"));
        assert!(matches!(result, Err(Error::LedgerWrite { .. })));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.exists("root"));
    }

    #[test]
    fn test_unreadable_file_fails_closed() {
        let dir = tempfile::tempdir().unwrap();
        // Opening a directory succeeds but reading it does not.
        let path = dir.path().join("users.txt");
        std::fs::create_dir(&path).unwrap();
        let ledger = RecordLedger::open(&path);

        assert!(!ledger.exists("x"));
        assert_eq!(ledger.authenticate("x", "y"), None);
        assert!(matches!(ledger.reload(), Err(Error::LedgerRead { .. })));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let (_dir, ledger) = create_test_ledger();
        assert!(ledger.register(admin("root", "pw1")).unwrap());
        assert!(!ledger.register(employee("ROOT", "pw2")).unwrap());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_authenticate_admin() {
        let (_dir, ledger) = create_test_ledger();
        ledger.append_admin(admin("root", "pw1")).unwrap();

        assert_eq!(ledger.authenticate("root", "pw1"), Some(Role::Admin));
        assert_eq!(ledger.authenticate("root", "wrong"), None);
        assert_eq!(ledger.authenticate("nobody", "pw1"), None);
    }

    #[test]
    fn test_authenticate_employee() {
        let (_dir, ledger) = create_test_ledger();
        ledger.append_employee(employee("alice", "s3cret")).unwrap();

        assert_eq!(ledger.authenticate("alice", "s3cret"), Some(Role::Employee));
    }

    #[test]
    fn test_authenticate_is_case_sensitive() {
        let (_dir, ledger) = create_test_ledger();
        ledger.append_admin(admin("root", "pw1")).unwrap();

        assert_eq!(ledger.authenticate("Root", "pw1"), None);
        assert_eq!(ledger.authenticate("root", "PW1"), None);
    }

    #[test]
    fn test_authenticate_first_match_wins() {
        let (_dir, ledger) = create_test_ledger();
        ledger.append_employee(employee("dup", "pw")).unwrap();
        ledger.append_admin(admin("dup", "pw")).unwrap();

        assert_eq!(ledger.authenticate("dup", "pw"), Some(Role::Employee));
    }

    #[test]
    fn test_authenticate_unknown_role() {
        let (_dir, ledger) = create_test_ledger();
        std::fs::write(
            ledger.path(),
            "{\"role\":\"contractor\",\"username\":\"carl\",\"password\":\"pw\"}\n",
        )
        .unwrap();

        assert_eq!(ledger.authenticate("carl", "pw"), Some(Role::Unknown));
    }

    #[test]
    fn test_authenticate_missing_file() {
        let (_dir, ledger) = create_test_ledger();
        assert_eq!(ledger.authenticate("root", "pw1"), None);
    }

    #[test]
    fn test_authenticate_with_quoted_password() {
        let (_dir, ledger) = create_test_ledger();
        ledger.append_admin(admin("root", r#"p"w"#)).unwrap();

        assert_eq!(ledger.authenticate("root", r#"p"w"#), Some(Role::Admin));
    }

    #[test]
    fn test_reload_restores_records() {
        let (dir, ledger) = create_test_ledger();
        ledger.append_admin(admin("root", "pw1")).unwrap();
        ledger.append_employee(employee("alice", "pw2")).unwrap();

        let restored = RecordLedger::open_and_load(dir.path().join("users.txt")).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.admins().len(), 1);
        assert_eq!(restored.employees()[0].username, "alice");
        assert!(restored.exists("ALICE"));
    }

    #[test]
    fn test_reload_skips_malformed_lines() {
        let (_dir, ledger) = create_test_ledger();
        ledger.append_admin(admin("root", "pw1")).unwrap();
        let mut file = OpenOptions::new().append(true).open(ledger.path()).unwrap();
        writeln!(file, "garbage").unwrap();
        writeln!(file).unwrap();

        assert_eq!(ledger.reload().unwrap(), 1);
        assert_eq!(ledger.records()[0].username(), "root");
    }

    #[test]
    fn test_reload_skips_value_ending_in_backslash() {
        let (_dir, ledger) = create_test_ledger();
        let mut record = admin("slash", "pw");
        record.name = r"a\".to_string();
        ledger.append_admin(record).unwrap();

        assert_eq!(ledger.reload().unwrap(), 0);
        assert_eq!(ledger.authenticate("slash", "pw"), Some(Role::Admin));
    }

    #[test]
    fn test_reload_missing_file_clears_memory() {
        let (_dir, ledger) = create_test_ledger();
        assert_eq!(ledger.reload().unwrap(), 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_admins_and_employees_split() {
        let (_dir, ledger) = create_test_ledger();
        ledger.append_admin(admin("root", "pw1")).unwrap();
        ledger.append_employee(employee("alice", "pw2")).unwrap();
        ledger.append_employee(employee("bob", "pw3")).unwrap();

        assert_eq!(ledger.admins().len(), 1);
        assert_eq!(ledger.employees().len(), 2);
        assert_eq!(ledger.records().len(), 3);
    }
}
