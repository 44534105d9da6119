//! Vault module — password-protected credential storage.
//!
//! This module provides:
//! - The `Credential` value record (`credential`)
//! - The SQLCipher-backed storage layer (`store`)
//! - The public `Keyring` facade with open-or-create semantics (`keyring`)

pub mod credential;
pub mod keyring;
pub mod store;

// Re-export the most commonly used items.
pub use credential::Credential;
pub use keyring::Keyring;
pub use store::CredentialVault;
