//! Keyring — the public facade over one open credential vault.
//!
//! Adds open-or-create construction on top of the storage layer and
//! owns its release lifecycle. All CRUD calls pass through unchanged.

use crate::config::Settings;
use crate::errors::{KeyringError, Result};

use super::credential::Credential;
use super::store::CredentialVault;

/// An opened keyring bound to one vault.
///
/// Construction is open-or-create: a missing vault is created
/// transparently, but an existing vault that cannot be opened fails
/// loudly — a wrong password never silently shadows existing data with
/// a fresh store.
pub struct Keyring {
    vault: CredentialVault,
}

impl Keyring {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the vault named `name`, creating it if it does not exist.
    ///
    /// Fails with `AccessDenied` if the vault exists but cannot be
    /// opened with `password`.
    pub fn open_or_create(name: &str, password: &str) -> Result<Self> {
        Self::open_or_create_with(&Settings::default(), name, password)
    }

    /// [`Keyring::open_or_create`] against explicit settings.
    pub fn open_or_create_with(
        settings: &Settings,
        name: &str,
        password: &str,
    ) -> Result<Self> {
        match CredentialVault::load(settings, name, password) {
            Ok(vault) => Ok(Self { vault }),
            Err(KeyringError::NotFound(_)) => {
                tracing::info!(name, "keyring not found, creating a new store");
                let vault = CredentialVault::create(settings, name, password, false)?;
                Ok(Self { vault })
            }
            Err(e) => Err(e),
        }
    }

    /// Whether a vault named `name` exists on disk. No password needed.
    pub fn exists(name: &str) -> bool {
        Self::exists_with(&Settings::default(), name)
    }

    /// [`Keyring::exists`] against explicit settings.
    pub fn exists_with(settings: &Settings, name: &str) -> bool {
        CredentialVault::exists(settings, name)
    }

    /// The name of the underlying vault.
    pub fn name(&self) -> &str {
        self.vault.name()
    }

    // ------------------------------------------------------------------
    // CRUD pass-through
    // ------------------------------------------------------------------

    /// All credentials in the keyring.
    pub fn get_all(&self) -> Result<Vec<Credential>> {
        self.vault.get_all()
    }

    /// The credential with the given id, if any.
    pub fn lookup_by_id(&self, id: i64) -> Result<Option<Credential>> {
        self.vault.lookup_by_id(id)
    }

    /// All credentials whose name matches exactly.
    pub fn lookup_by_name(&self, name: &str) -> Result<Vec<Credential>> {
        self.vault.lookup_by_name(name)
    }

    /// Add a credential to the keyring.
    pub fn add(&self, credential: &Credential) -> Result<bool> {
        self.vault.add(credential)
    }

    /// Update a stored credential in full.
    pub fn update(&self, credential: &Credential) -> Result<bool> {
        self.vault.update(credential)
    }

    /// Remove the credential with the given id.
    pub fn delete(&self, id: i64) -> Result<bool> {
        self.vault.delete(id)
    }

    // ------------------------------------------------------------------
    // Release
    // ------------------------------------------------------------------

    /// Destroy the keyring and its data on disk. Returns `false` if
    /// the container file could not be removed.
    pub fn destroy(self) -> bool {
        self.vault.destroy()
    }

    /// Release the underlying vault handle without deleting data.
    /// Idempotent.
    pub fn dispose(&mut self) {
        self.vault.dispose();
    }
}

// ── Tests ────────────────────────────────────────────────────────────
