//! A single user session: one key store plus one vault store.
//!
//! The session is what front ends drive.  It makes sure a key exists
//! before any vault is created or loaded, and it closes the vault
//! whenever the key is replaced so entries decrypted under the old key
//! are never served alongside the new one.

use std::path::Path;

use crate::crypto::keys::{generate_key, save_key, KeyStore, VaultKey};
use crate::errors::Result;
use crate::vault::{AddOutcome, LoadReport, VaultStore};

#[derive(Debug, Default)]
pub struct Session {
    keys: KeyStore,
    vault: VaultStore,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Keys
    // ------------------------------------------------------------------

    /// Generate a new key, save it to `path`, and make it the session key.
    ///
    /// If saving fails the previous key (and any open vault) stays in place.
    pub fn create_key(&mut self, path: &Path) -> Result<&VaultKey> {
        let key = generate_key();
        save_key(&key, path)?;

        self.vault.close();
        self.keys.set(key);
        self.keys.key()
    }

    /// Load the key at `path` and make it the session key.
    pub fn load_key(&mut self, path: &Path) -> Result<&VaultKey> {
        self.keys.load(path)?;
        self.vault.close();
        self.keys.key()
    }

    // ------------------------------------------------------------------
    // Vault lifecycle
    // ------------------------------------------------------------------

    pub fn create_vault(&mut self, path: &Path) -> Result<()> {
        let key = self.keys.key()?;
        self.vault.create(path, key)
    }

    pub fn create_vault_seeded<I, S, C>(&mut self, path: &Path, seed: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
        C: AsRef<str>,
    {
        let key = self.keys.key()?;
        self.vault.create_seeded(path, key, seed)
    }

    pub fn load_vault(&mut self, path: &Path) -> Result<LoadReport> {
        let key = self.keys.key()?;
        self.vault.load(path, key)
    }

    // ------------------------------------------------------------------
    // Entries
    // ------------------------------------------------------------------

    pub fn add_entry(&mut self, site: &str, credential: &str) -> Result<AddOutcome> {
        self.vault.add_entry(site, credential)
    }

    pub fn get_entry(&self, site: &str) -> Result<Option<&str>> {
        self.vault.get_entry(site)
    }

    pub fn list_sites(&self) -> Result<Vec<&str>> {
        self.vault.list_sites()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn key_store(&self) -> &KeyStore {
        &self.keys
    }

    pub fn vault(&self) -> &VaultStore {
        &self.vault
    }
}
