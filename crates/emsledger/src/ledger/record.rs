//! User record types held by the ledger.

use serde::Serialize;

/// Role tag of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// An administrator.
    Admin,
    /// A regular employee.
    Employee,
    /// A ledger line matched credentials but carried no recognised role.
    Unknown,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Employee => write!(f, "employee"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// An administrator account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminRecord {
    /// Display name.
    pub name: String,
    /// Login name, unique case-insensitively.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Stored as given.
    #[serde(skip_serializing)]
    pub password: String,
}

/// An employee account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    /// Display name.
    pub full_name: String,
    /// Login name, unique case-insensitively.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Department the employee belongs to.
    pub department: String,
    /// Employment type, e.g. "Full-time".
    pub employee_type: String,
    /// Postal address.
    pub address: String,
    /// Stored as given.
    #[serde(skip_serializing)]
    pub password: String,
}

/// A ledger entry, polymorphic over role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum UserRecord {
    /// Administrator record.
    Admin(AdminRecord),
    /// Employee record.
    Employee(EmployeeRecord),
}

impl UserRecord {
    /// The record's login name.
    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::Admin(admin) => &admin.username,
            Self::Employee(employee) => &employee.username,
        }
    }

    /// The record's display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Admin(admin) => &admin.name,
            Self::Employee(employee) => &employee.full_name,
        }
    }

    /// The record's role.
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Admin(_) => Role::Admin,
            Self::Employee(_) => Role::Employee,
        }
    }

    /// Case-insensitive username comparison.
    #[must_use]
    pub fn has_username(&self, username: &str) -> bool {
        self.username().to_lowercase() == username.to_lowercase()
    }
}

impl From<AdminRecord> for UserRecord {
    fn from(record: AdminRecord) -> Self {
        Self::Admin(record)
    }
}

impl From<EmployeeRecord> for UserRecord {
    fn from(record: EmployeeRecord) -> Self {
        Self::Employee(record)
    }
}
