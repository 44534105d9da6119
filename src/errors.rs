use thiserror::Error;

/// All errors that can occur in nring.
#[derive(Debug, Error)]
pub enum KeyringError {
    // --- Vault lifecycle errors ---
    #[error("no keyring found with the name '{0}'")]
    NotFound(String),

    #[error("a keyring already exists with the name '{0}'")]
    Conflict(String),

    /// The container exists but could not be opened. Wrong password and
    /// corrupt/foreign file are intentionally not distinguished.
    #[error("unable to access the keyring — wrong password or unreadable store")]
    AccessDenied,

    #[error("keyring handle has already been released")]
    Disposed,

    // --- Boundary validation errors ---
    #[error("invalid input: {0}")]
    Validation(String),

    // --- Storage errors ---
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for nring results.
pub type Result<T> = std::result::Result<T, KeyringError>;
