//! Line format of the ledger file.
//!
//! One record per line, shaped like a flat JSON object:
//!
//! ```text
//! {"role":"admin","name":"…","username":"…","email":"…","password":"…"}
//! ```
//!
//! It is not JSON. Only `"` is escaped (as `\"`); backslashes and control
//! characters are written verbatim. Lookups match quoted `"key":"value"`
//! markers as substrings instead of parsing, so the writer here must stay
//! byte-for-byte stable.

use std::iter::Peekable;
use std::str::Chars;

use super::record::{AdminRecord, EmployeeRecord, UserRecord};

/// Escape a value for embedding between quotes.
#[must_use]
pub fn escape(value: &str) -> String {
    value.replace('"', "\\\"")
}

/// The `"key":"value"` marker as it appears on a ledger line.
#[must_use]
pub fn marker(key: &str, value: &str) -> String {
    format!("\"{key}\":\"{}\"", escape(value))
}

/// Role marker written on admin lines.
pub const ADMIN_ROLE_MARKER: &str = r#""role":"admin""#;

/// Role marker written on employee lines.
pub const EMPLOYEE_ROLE_MARKER: &str = r#""role":"employee""#;

/// Serialize a record to its ledger line, without the trailing newline.
#[must_use]
pub fn to_line(record: &UserRecord) -> String {
    let fields: Vec<String> = match record {
        UserRecord::Admin(admin) => vec![
            ADMIN_ROLE_MARKER.to_string(),
            marker("name", &admin.name),
            marker("username", &admin.username),
            marker("email", &admin.email),
            marker("password", &admin.password),
        ],
        UserRecord::Employee(employee) => vec![
            EMPLOYEE_ROLE_MARKER.to_string(),
            marker("fullName", &employee.full_name),
            marker("username", &employee.username),
            marker("email", &employee.email),
            marker("phone", &employee.phone),
            marker("department", &employee.department),
            marker("employeeType", &employee.employee_type),
            marker("address", &employee.address),
            marker("password", &employee.password),
        ],
    };
    format!("{{{}}}", fields.join(","))
}

/// Split a ledger line into its `(key, value)` pairs, unescaping `\"`.
///
/// Returns `None` when the line is not in the ledger shape.
#[must_use]
pub fn parse_fields(line: &str) -> Option<Vec<(String, String)>> {
    let body = line.trim().strip_prefix('{')?.strip_suffix('}')?;
    let mut chars = body.chars().peekable();
    let mut fields = Vec::new();

    loop {
        let key = read_quoted(&mut chars)?;
        if chars.next()? != ':' {
            return None;
        }
        let value = read_quoted(&mut chars)?;
        fields.push((key, value));

        match chars.next() {
            None => return Some(fields),
            Some(',') => {}
            Some(_) => return None,
        }
    }
}

fn read_quoted(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    if chars.next()? != '"' {
        return None;
    }
    let mut out = String::new();
    loop {
        match chars.next()? {
            '\\' if chars.peek() == Some(&'"') => {
                chars.next();
                out.push('"');
            }
            '"' => return Some(out),
            c => out.push(c),
        }
    }
}

/// Rebuild a record from a ledger line.
///
/// Requires a known `role` and a `username`; any other missing field is
/// read as empty.
///
/// Backslashes are written verbatim, so a value ending in `\` is read back
/// as an escaped quote and the line is rejected as malformed. Lookups on the
/// raw file still match it.
#[must_use]
pub fn from_line(line: &str) -> Option<UserRecord> {
    let fields = parse_fields(line)?;
    let get = |key: &str| {
        fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };
    let field = |key: &str| get(key).unwrap_or_default();

    let username = get("username")?;
    match get("role")?.as_str() {
        "admin" => Some(UserRecord::Admin(AdminRecord {
            name: field("name"),
            username,
            email: field("email"),
            password: field("password"),
        })),
        "employee" => Some(UserRecord::Employee(EmployeeRecord {
            full_name: field("fullName"),
            username,
            email: field("email"),
            phone: field("phone"),
            department: field("department"),
            employee_type: field("employeeType"),
            address: field("address"),
            password: field("password"),
        })),
        _ => None,
    }
}
