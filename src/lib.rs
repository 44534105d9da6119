pub mod config;
pub mod errors;
pub mod vault;

pub use config::Settings;
pub use errors::{KeyringError, Result};
pub use vault::{Credential, CredentialVault, Keyring};
