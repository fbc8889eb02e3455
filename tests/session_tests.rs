//! Integration tests for the session state machine.

use std::fs;

use credvault::errors::VaultError;
use credvault::session::Session;
use tempfile::TempDir;

#[test]
fn vault_operations_require_a_key() {
    let dir = TempDir::new().unwrap();
    let vault = dir.path().join("v.txt");
    let mut session = Session::new();

    assert!(matches!(
        session.create_vault(&vault),
        Err(VaultError::Precondition(_))
    ));
    assert!(matches!(
        session.load_vault(&vault),
        Err(VaultError::Precondition(_))
    ));
    // No partial effect: nothing was created on disk.
    assert!(!vault.exists());
}

#[test]
fn entry_operations_require_a_vault() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::new();
    session.create_key(&dir.path().join("k.bin")).unwrap();

    assert!(matches!(
        session.add_entry("a.com", "pw"),
        Err(VaultError::Precondition(_))
    ));
    assert!(matches!(
        session.get_entry("a.com"),
        Err(VaultError::Precondition(_))
    ));
    assert!(matches!(session.list_sites(), Err(VaultError::Precondition(_))));
}

#[test]
fn end_to_end_across_sessions() {
    let dir = TempDir::new().unwrap();
    let key_path = dir.path().join("k.bin");
    let vault = dir.path().join("v.txt");

    let mut first = Session::new();
    first.create_key(&key_path).unwrap();
    first
        .create_vault_seeded(&vault, [("example.com", "alice:s3cr3t")])
        .unwrap();
    drop(first);

    let mut second = Session::new();
    second.load_key(&key_path).unwrap();
    let report = second.load_vault(&vault).unwrap();

    assert!(report.warnings.is_empty());
    assert_eq!(second.get_entry("example.com").unwrap(), Some("alice:s3cr3t"));
}

#[test]
fn replacing_the_key_closes_the_vault() {
    let dir = TempDir::new().unwrap();
    let vault = dir.path().join("v.txt");

    let mut session = Session::new();
    session.create_key(&dir.path().join("a.bin")).unwrap();
    session.create_vault(&vault).unwrap();
    session.add_entry("a.com", "pw").unwrap();

    session.create_key(&dir.path().join("b.bin")).unwrap();
    assert!(!session.vault().is_ready());
    assert!(session.get_entry("a.com").is_err());

    // Reloading under the new key surfaces nothing from the old key.
    let report = session.load_vault(&vault).unwrap();
    assert_eq!(report.entries, 0);
    assert_eq!(report.warnings.len(), 1);
    assert!(session.list_sites().unwrap().is_empty());
}

#[test]
fn loading_a_key_closes_the_vault() {
    let dir = TempDir::new().unwrap();
    let key_path = dir.path().join("k.bin");

    let mut session = Session::new();
    session.create_key(&key_path).unwrap();
    session.create_vault(&dir.path().join("v.txt")).unwrap();

    session.load_key(&key_path).unwrap();
    assert!(!session.vault().is_ready());
}

#[test]
fn failed_key_creation_keeps_current_state() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::new();
    let fingerprint = session
        .create_key(&dir.path().join("k.bin"))
        .unwrap()
        .fingerprint();
    session.create_vault(&dir.path().join("v.txt")).unwrap();
    session.add_entry("a.com", "pw").unwrap();

    let missing_dir = dir.path().join("nope").join("k.bin");
    assert!(matches!(
        session.create_key(&missing_dir),
        Err(VaultError::Io(_))
    ));

    assert_eq!(session.key_store().key().unwrap().fingerprint(), fingerprint);
    assert_eq!(session.get_entry("a.com").unwrap(), Some("pw"));
}

#[test]
fn invalid_key_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let key_path = dir.path().join("short.bin");
    fs::write(&key_path, b"too short").unwrap();

    let mut session = Session::new();
    assert!(matches!(
        session.load_key(&key_path),
        Err(VaultError::InvalidKey { actual: 9, .. })
    ));
    assert!(!session.key_store().has_key());
}

#[test]
fn entries_added_in_session_are_listed_sorted() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::new();
    session.create_key(&dir.path().join("k.bin")).unwrap();
    session.load_vault(&dir.path().join("v.txt")).unwrap();

    for site in ["zoo", "apple", "Mango", "banana"] {
        session.add_entry(site, "pw").unwrap();
    }

    assert_eq!(
        session.list_sites().unwrap(),
        vec!["Mango", "apple", "banana", "zoo"]
    );
}
