//! Credential — the value record stored inside a keyring.
//!
//! A credential holds a required name plus optional uri, username, and
//! password. The id is assigned by the storage layer on insertion and
//! is the sole stable handle for update/delete. Absent optional fields
//! are `None` in the domain model; the empty-string storage sentinel
//! never appears here.

use std::fmt;

use crate::errors::{KeyringError, Result};

/// A single credential stored in a keyring.
///
/// Equality is by value across all fields, including the id.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Engine-assigned row id. `None` until the record is persisted.
    id: Option<i64>,

    /// The name of the credential (e.g. "github"). Required, non-empty.
    pub name: String,

    /// The uri of the credential, if any.
    pub uri: Option<String>,

    /// The username of the credential, if any.
    pub username: Option<String>,

    /// The password of the credential, if any. Confidentiality comes
    /// from the encrypted container, not from this record.
    pub password: Option<String>,
}

impl Credential {
    /// Construct a new, not-yet-persisted credential.
    ///
    /// The name must be non-empty. A malformed uri is not fatal — it is
    /// discarded with a warning, as if the caller had omitted it.
    pub fn new(
        name: &str,
        uri: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self> {
        validate_name(name)?;
        Ok(Self {
            id: None,
            name: name.to_string(),
            uri: uri.and_then(parse_uri),
            username: username.map(str::to_string),
            password: password.map(str::to_string),
        })
    }

    /// Rebuild a credential from a stored row.
    pub(crate) fn from_row(
        id: i64,
        name: String,
        uri: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            uri,
            username,
            password,
        }
    }

    /// The engine-assigned id, or `None` if never persisted.
    pub fn id(&self) -> Option<i64> {
        self.id
    }
}

/// Debug output never reveals the stored password.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Human-readable summary without the password.
impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.uri {
            Some(uri) => write!(f, "{} ({uri})", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Validate that a credential name is present.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(KeyringError::Validation(
            "credential name cannot be empty".into(),
        ));
    }
    Ok(())
}

/// Lenient uri well-formedness check used at the construction boundary.
///
/// Accepted shape: `scheme ':' rest`, where the scheme starts with an
/// ASCII letter and continues with letters, digits, `+`, `-`, or `.`,
/// and the remainder is non-empty with no whitespace. Anything else is
/// discarded with a warning rather than failing the whole operation.
pub fn parse_uri(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if is_well_formed(trimmed) {
        Some(trimmed.to_string())
    } else {
        tracing::warn!(uri = raw, "discarding malformed credential uri");
        None
    }
}

fn is_well_formed(uri: &str) -> bool {
    if uri.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let Some((scheme, rest)) = uri.split_once(':') else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }
    let mut bytes = scheme.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'-' || b == b'.')
}

// ── Tests ────────────────────────────────────────────────────────────
