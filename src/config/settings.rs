use std::path::PathBuf;

use crate::errors::{KeyringError, Result};

/// File extension for vault containers.
pub const VAULT_EXTENSION: &str = "nring";

/// Maximum length of a vault name.
const MAX_NAME_LEN: usize = 64;

/// Resolves where vault containers live on disk.
///
/// Every vault name maps deterministically to
/// `{data_dir}/{vendor}/Keyring/{name}.nring`. The defaults work
/// out-of-the-box; tests override `data_dir` so they never touch the
/// real user data directory.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Vendor directory segment under the user data dir.
    pub vendor: String,

    /// Base directory override. `None` means the per-user
    /// application-data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vendor: "Nring".to_string(),
            data_dir: None,
        }
    }
}

impl Settings {
    /// Settings rooted at an explicit base directory.
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// The directory all vault containers are stored under.
    ///
    /// Example: `~/.local/share/Nring/Keyring`
    pub fn store_dir(&self) -> Result<PathBuf> {
        let base = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir().ok_or_else(|| {
                KeyringError::Validation("no application data directory for this user".into())
            })?,
        };
        Ok(base.join(&self.vendor).join("Keyring"))
    }

    /// Build the full path to a vault container for a given name.
    ///
    /// Example: `~/.local/share/Nring/Keyring/work.nring`
    pub fn vault_path(&self, name: &str) -> Result<PathBuf> {
        validate_vault_name(name)?;
        Ok(self
            .store_dir()?
            .join(format!("{name}.{VAULT_EXTENSION}")))
    }
}

/// Validate that a vault name is safe to use as a filename.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty and at most 64 characters. This keeps a vault
/// name from ever escaping the store directory.
pub fn validate_vault_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(KeyringError::Validation(
            "keyring name cannot be empty".into(),
        ));
    }

    if name.len() > MAX_NAME_LEN {
        return Err(KeyringError::Validation(format!(
            "keyring name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }

    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(KeyringError::Validation(format!(
            "keyring name '{name}' is invalid — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }

    // ".." alone is a path component; the allowed alphabet already
    // excludes separators.
    if name.chars().all(|c| c == '.') {
        return Err(KeyringError::Validation(format!(
            "keyring name '{name}' is invalid"
        )));
    }

    Ok(())
}

/// Ensure the store directory exists, creating it if needed.
pub fn ensure_store_dir(settings: &Settings) -> Result<PathBuf> {
    let dir = settings.store_dir()?;
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

// ── Tests ────────────────────────────────────────────────────────────
