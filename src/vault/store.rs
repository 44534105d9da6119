//! CredentialVault — the SQLCipher-backed storage layer.
//!
//! Owns the on-disk encrypted container for one keyring: deterministic
//! path resolution, container lifecycle (create/load/destroy/dispose),
//! schema bootstrap, and the raw CRUD primitives. Every operation is a
//! self-contained unit of work: it opens the container, performs one
//! statement, and drops the connection before returning. No open
//! handle is held between calls, so no decrypted state or file lock
//! outlives the operation.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Row};
use zeroize::Zeroizing;

use crate::config::settings::ensure_store_dir;
use crate::config::Settings;
use crate::errors::{KeyringError, Result};

use super::credential::{self, Credential};

/// Idempotent schema bootstrap — safe to run on an already-initialized
/// container. Ids are engine-assigned and never reused after deletion.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS credentials (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL,
    uri      TEXT NOT NULL DEFAULT '',
    username TEXT NOT NULL DEFAULT '',
    password TEXT NOT NULL DEFAULT ''
);";

/// A store object for credentials, backed by SQLCipher.
///
/// Constructed only through [`CredentialVault::create`] or
/// [`CredentialVault::load`]. The password is held as key material for
/// per-call connections and is wiped on dispose, destroy, or drop.
pub struct CredentialVault {
    name: String,
    location: PathBuf,
    key: Option<Zeroizing<String>>,
}

impl CredentialVault {
    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Whether a container exists for `name`. Pure filesystem
    /// predicate: no password needed, no side effects. An invalid name
    /// simply has no container.
    pub fn exists(settings: &Settings, name: &str) -> bool {
        settings
            .vault_path(name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Create a new store for `name`, keyed by `password`.
    ///
    /// Fails with `Conflict` if a container already exists at the path
    /// and `overwrite` is false; with `overwrite` the old file is
    /// deleted first.
    pub fn create(
        settings: &Settings,
        name: &str,
        password: &str,
        overwrite: bool,
    ) -> Result<Self> {
        let location = settings.vault_path(name)?;
        ensure_store_dir(settings)?;

        if location.exists() {
            if overwrite {
                fs::remove_file(&location)?;
            } else {
                return Err(KeyringError::Conflict(name.to_string()));
            }
        }

        let vault = Self {
            name: name.to_string(),
            location,
            key: Some(Zeroizing::new(password.to_string())),
        };
        vault.bootstrap()?;

        tracing::debug!(name = %vault.name, "created keyring store");
        Ok(vault)
    }

    /// Load an existing store for `name`, keyed by `password`.
    ///
    /// Fails with `NotFound` if no container exists at the path. Any
    /// failure to establish the connection after that — wrong password,
    /// corrupt or foreign file — is reported uniformly as
    /// `AccessDenied`, without surfacing the underlying cause.
    pub fn load(settings: &Settings, name: &str, password: &str) -> Result<Self> {
        let location = settings.vault_path(name)?;
        if !location.is_file() {
            return Err(KeyringError::NotFound(name.to_string()));
        }

        let vault = Self {
            name: name.to_string(),
            location,
            key: Some(Zeroizing::new(password.to_string())),
        };
        vault.bootstrap().map_err(|_| KeyringError::AccessDenied)?;

        tracing::debug!(name = %vault.name, "opened keyring store");
        Ok(vault)
    }

    /// The name of the store.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The location of the store on disk.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Release the key material without touching on-disk content.
    /// Idempotent; any further operation on this vault fails with
    /// `Disposed`.
    pub fn dispose(&mut self) {
        // Zeroizing wipes the password bytes on drop.
        self.key.take();
    }

    /// Destroy the store and all its data on disk. Consumes the vault,
    /// so it cannot be used afterwards regardless of outcome. Returns
    /// `false` if the container file could not be removed.
    pub fn destroy(mut self) -> bool {
        self.dispose();
        match fs::remove_file(&self.location) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(location = %self.location.display(), error = %e,
                    "failed to remove keyring container");
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // CRUD primitives
    // ------------------------------------------------------------------

    /// All credentials in the store, in insertion (id) order.
    pub fn get_all(&self) -> Result<Vec<Credential>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare("SELECT id, name, uri, username, password FROM credentials ORDER BY id")?;
        let rows = stmt.query_map([], row_to_credential)?;

        let mut credentials = Vec::new();
        for row in rows {
            credentials.push(row?);
        }
        Ok(credentials)
    }

    /// The credential with the given id, if any.
    pub fn lookup_by_id(&self, id: i64) -> Result<Option<Credential>> {
        let conn = self.connect()?;
        let credential = conn
            .query_row(
                "SELECT id, name, uri, username, password FROM credentials WHERE id = ?1",
                params![id],
                row_to_credential,
            )
            .optional()?;
        Ok(credential)
    }

    /// All credentials whose name matches `name` exactly.
    pub fn lookup_by_name(&self, name: &str) -> Result<Vec<Credential>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, uri, username, password FROM credentials WHERE name = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![name], row_to_credential)?;

        let mut credentials = Vec::new();
        for row in rows {
            credentials.push(row?);
        }
        Ok(credentials)
    }

    /// Insert a credential. The id is assigned by the engine; absent
    /// optional fields are stored as empty strings. Returns whether
    /// exactly one row was inserted.
    pub fn add(&self, credential: &Credential) -> Result<bool> {
        credential::validate_name(&credential.name)?;

        let conn = self.connect()?;
        let affected = conn.execute(
            "INSERT INTO credentials (name, uri, username, password) VALUES (?1, ?2, ?3, ?4)",
            params![
                credential.name,
                to_sentinel(&credential.uri),
                to_sentinel(&credential.username),
                to_sentinel(&credential.password),
            ],
        )?;

        tracing::debug!(id = conn.last_insert_rowid(), "credential stored");
        Ok(affected == 1)
    }

    /// Replace all non-id fields of the row matching `credential.id`.
    /// Returns `false` if the credential was never persisted or no row
    /// has that id.
    pub fn update(&self, credential: &Credential) -> Result<bool> {
        credential::validate_name(&credential.name)?;
        let Some(id) = credential.id() else {
            return Ok(false);
        };

        let conn = self.connect()?;
        let affected = conn.execute(
            "UPDATE credentials SET name = ?1, uri = ?2, username = ?3, password = ?4 WHERE id = ?5",
            params![
                credential.name,
                to_sentinel(&credential.uri),
                to_sentinel(&credential.username),
                to_sentinel(&credential.password),
                id,
            ],
        )?;
        Ok(affected == 1)
    }

    /// Remove the credential with the given id. Returns whether exactly
    /// one row was removed.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let affected = conn.execute("DELETE FROM credentials WHERE id = ?1", params![id])?;

        if affected > 0 {
            tracing::debug!(id, "credential deleted");
        }
        Ok(affected == 1)
    }

    // ------------------------------------------------------------------
    // Container plumbing
    // ------------------------------------------------------------------

    /// Open a fresh connection for a single unit of work. The caller
    /// drops it before returning, which closes the container.
    fn connect(&self) -> Result<Connection> {
        let key = self.key.as_ref().ok_or(KeyringError::Disposed)?;

        let conn = Connection::open(&self.location)?;
        conn.pragma_update(None, "key", key.as_str())?;

        // A wrong key surfaces here as "file is not a database".
        conn.execute_batch("SELECT count(*) FROM sqlite_master;")
            .map_err(|_| KeyringError::AccessDenied)?;

        Ok(conn)
    }

    /// Open the container and ensure the credentials table exists.
    fn bootstrap(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }
}

/// Parse a credential row, converting storage sentinels back to `None`.
fn row_to_credential(row: &Row<'_>) -> rusqlite::Result<Credential> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let uri: String = row.get(2)?;
    let username: String = row.get(3)?;
    let password: String = row.get(4)?;
    Ok(Credential::from_row(
        id,
        name,
        from_sentinel(uri),
        from_sentinel(username),
        from_sentinel(password),
    ))
}

/// Absent optional fields are stored as empty strings.
fn to_sentinel(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

fn from_sentinel(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
