//! Integration tests for the nring keyring.

use nring::{Credential, CredentialVault, Keyring, KeyringError, Settings};
use tempfile::TempDir;

/// Helper: settings rooted in a fresh temp dir so tests never touch
/// the real user data directory.
fn test_settings() -> (TempDir, Settings) {
    let dir = TempDir::new().expect("create temp dir");
    let settings = Settings::with_data_dir(dir.path());
    (dir, settings)
}

// ---------------------------------------------------------------------------
// Open-or-create lifecycle
// ---------------------------------------------------------------------------

#[test]
fn open_or_create_then_exists_and_name() {
    let (_dir, settings) = test_settings();

    assert!(!Keyring::exists_with(&settings, "work"));

    let keyring = Keyring::open_or_create_with(&settings, "work", "p1").expect("create keyring");
    assert!(Keyring::exists_with(&settings, "work"));
    assert_eq!(keyring.name(), "work");
}

#[test]
fn load_never_created_vault_is_not_found() {
    let (_dir, settings) = test_settings();

    let result = CredentialVault::load(&settings, "missing", "any");
    assert!(matches!(result, Err(KeyringError::NotFound(_))));
}

#[test]
fn wrong_password_always_access_denied() {
    let (_dir, settings) = test_settings();

    let keyring = Keyring::open_or_create_with(&settings, "work", "correct").unwrap();
    let cred = Credential::new("github", None, None, Some("s3cret")).unwrap();
    keyring.add(&cred).unwrap();

    let result = Keyring::open_or_create_with(&settings, "work", "wrong");
    assert!(matches!(result, Err(KeyringError::AccessDenied)));

    // Never partially succeeds: the vault still opens intact with the
    // right password.
    let reopened = Keyring::open_or_create_with(&settings, "work", "correct").unwrap();
    assert_eq!(reopened.get_all().unwrap().len(), 1);
}

#[test]
fn create_without_overwrite_preserves_existing_vault() {
    let (_dir, settings) = test_settings();

    let vault = CredentialVault::create(&settings, "work", "p1", false).unwrap();
    vault
        .add(&Credential::new("github", None, Some("bob"), None).unwrap())
        .unwrap();

    let result = CredentialVault::create(&settings, "work", "p2", false);
    assert!(matches!(result, Err(KeyringError::Conflict(_))));

    let reloaded = CredentialVault::load(&settings, "work", "p1").unwrap();
    let all = reloaded.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "github");
}

// ---------------------------------------------------------------------------
// Add and lookup round-trip
// ---------------------------------------------------------------------------

#[test]
fn added_credential_roundtrips_by_id() {
    let (_dir, settings) = test_settings();
    let keyring = Keyring::open_or_create_with(&settings, "work", "p1").unwrap();

    let cred = Credential::new(
        "github",
        Some("https://github.com"),
        Some("bob"),
        Some("s3cret"),
    )
    .unwrap();
    assert!(keyring.add(&cred).unwrap());

    let id = keyring.get_all().unwrap()[0].id().expect("id assigned on insert");
    let stored = keyring.lookup_by_id(id).unwrap().expect("credential present");

    // Every field matches the input except the engine-assigned id.
    assert_eq!(stored.name, cred.name);
    assert_eq!(stored.uri, cred.uri);
    assert_eq!(stored.username, cred.username);
    assert_eq!(stored.password, cred.password);
}

#[test]
fn lookup_by_name_returns_all_exact_matches() {
    let (_dir, settings) = test_settings();
    let keyring = Keyring::open_or_create_with(&settings, "work", "p1").unwrap();

    keyring
        .add(&Credential::new("github", None, Some("bob"), None).unwrap())
        .unwrap();
    keyring
        .add(&Credential::new("github", None, Some("alice"), None).unwrap())
        .unwrap();
    keyring
        .add(&Credential::new("gitlab", None, None, None).unwrap())
        .unwrap();

    let matches = keyring.lookup_by_name("github").unwrap();
    assert_eq!(matches.len(), 2);
    assert!(keyring.lookup_by_name("hub").unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Update semantics
// ---------------------------------------------------------------------------

#[test]
fn update_missing_id_returns_false_and_changes_nothing() {
    let (_dir, settings) = test_settings();
    let keyring = Keyring::open_or_create_with(&settings, "work", "p1").unwrap();

    keyring
        .add(&Credential::new("github", None, Some("bob"), None).unwrap())
        .unwrap();
    let before = keyring.get_all().unwrap();

    let unsaved = Credential::new("phantom", None, None, None).unwrap();
    assert!(!keyring.update(&unsaved).unwrap());

    let after = keyring.get_all().unwrap();
    assert_eq!(before, after);
}

#[test]
fn update_existing_credential_replaces_fields() {
    let (_dir, settings) = test_settings();
    let keyring = Keyring::open_or_create_with(&settings, "work", "p1").unwrap();

    keyring
        .add(&Credential::new("github", None, Some("bob"), Some("old")).unwrap())
        .unwrap();

    let mut stored = keyring.get_all().unwrap().remove(0);
    stored.password = Some("new".to_string());
    assert!(keyring.update(&stored).unwrap());

    let reread = keyring.lookup_by_id(stored.id().unwrap()).unwrap().unwrap();
    assert_eq!(reread.password.as_deref(), Some("new"));
}

// ---------------------------------------------------------------------------
// Delete semantics
// ---------------------------------------------------------------------------

#[test]
fn delete_existing_then_lookup_is_absent() {
    let (_dir, settings) = test_settings();
    let keyring = Keyring::open_or_create_with(&settings, "work", "p1").unwrap();

    keyring
        .add(&Credential::new("github", None, None, None).unwrap())
        .unwrap();
    let id = keyring.get_all().unwrap()[0].id().unwrap();

    assert!(keyring.delete(id).unwrap());
    assert!(keyring.lookup_by_id(id).unwrap().is_none());
}

#[test]
fn delete_nonexistent_returns_false() {
    let (_dir, settings) = test_settings();
    let keyring = Keyring::open_or_create_with(&settings, "work", "p1").unwrap();

    assert!(!keyring.delete(42).unwrap());
}

// ---------------------------------------------------------------------------
// Full scenario: create, add, list, destroy
// ---------------------------------------------------------------------------

#[test]
fn work_vault_end_to_end() {
    let (_dir, settings) = test_settings();

    let keyring = Keyring::open_or_create_with(&settings, "work", "p1").unwrap();
    let cred = Credential::new(
        "github",
        Some("https://github.com"),
        Some("bob"),
        Some("s3cret"),
    )
    .unwrap();
    assert!(keyring.add(&cred).unwrap());

    let all = keyring.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "github");
    assert_eq!(all[0].uri.as_deref(), Some("https://github.com"));
    assert_eq!(all[0].username.as_deref(), Some("bob"));
    assert_eq!(all[0].password.as_deref(), Some("s3cret"));

    assert!(keyring.destroy());
    assert!(!Keyring::exists_with(&settings, "work"));
}

// ---------------------------------------------------------------------------
// Dispose keeps data on disk
// ---------------------------------------------------------------------------

#[test]
fn dispose_releases_handle_but_keeps_data() {
    let (_dir, settings) = test_settings();

    let mut keyring = Keyring::open_or_create_with(&settings, "work", "p1").unwrap();
    keyring
        .add(&Credential::new("github", None, None, None).unwrap())
        .unwrap();

    keyring.dispose();
    assert!(matches!(keyring.get_all(), Err(KeyringError::Disposed)));
    assert!(Keyring::exists_with(&settings, "work"));

    let reopened = Keyring::open_or_create_with(&settings, "work", "p1").unwrap();
    assert_eq!(reopened.get_all().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Malformed uri is recoverable
// ---------------------------------------------------------------------------

#[test]
fn malformed_uri_stores_as_omitted() {
    let (_dir, settings) = test_settings();
    let keyring = Keyring::open_or_create_with(&settings, "work", "p1").unwrap();

    let cred = Credential::new("github", Some("not a uri"), Some("bob"), None).unwrap();
    assert!(keyring.add(&cred).unwrap());

    let stored = &keyring.get_all().unwrap()[0];
    assert!(stored.uri.is_none());
    assert_eq!(stored.username.as_deref(), Some("bob"));
}
