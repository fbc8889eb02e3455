//! High-level vault operations used by the session and CLI commands.
//!
//! `VaultStore` keeps the decrypted site -> credential map in memory
//! and routes every mutation through the cipher and the append-only
//! file, so callers can write `store.add_entry("example.com", "...")`.
//!
//! A store starts out uninitialized; `create` or `load` binds it to a
//! vault file and a key.  Entry operations before that fail with a
//! precondition error instead of touching a half-configured vault.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::Zeroize;

use crate::crypto::encryption::encrypt_token;
use crate::crypto::keys::VaultKey;
use crate::errors::{Result, VaultError};

use super::format::{self, LoadWarning};

/// Whether `add_entry` created a new site or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted,
    Updated,
}

/// Summary of a `load` call.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of distinct sites now held in memory.
    pub entries: usize,
    /// Per-line problems that were skipped.
    pub warnings: Vec<LoadWarning>,
}

/// A vault bound to a file and a key.
struct OpenVault {
    path: PathBuf,
    key: VaultKey,
    entries: BTreeMap<String, String>,
}

impl Drop for OpenVault {
    fn drop(&mut self) {
        for credential in self.entries.values_mut() {
            credential.zeroize();
        }
    }
}

#[derive(Default)]
enum State {
    #[default]
    Uninitialized,
    Ready(OpenVault),
}

/// The main vault handle.
#[derive(Default)]
pub struct VaultStore {
    state: State,
}

// Entries are plaintext credentials, so only the shape is shown.
impl fmt::Debug for VaultStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultStore")
            .field("path", &self.path())
            .field("entries", &self.len())
            .finish()
    }
}

impl VaultStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Create (or truncate) an empty vault file at `path` bound to `key`.
    pub fn create(&mut self, path: &Path, key: &VaultKey) -> Result<()> {
        self.create_seeded(path, key, std::iter::empty::<(&str, &str)>())
    }

    /// Create a vault file and add each seed pair in iteration order.
    ///
    /// Every seed site is validated before the file is touched, so an
    /// unusable seed leaves the existing file and store state alone.
    pub fn create_seeded<I, S, C>(&mut self, path: &Path, key: &VaultKey, seed: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
        C: AsRef<str>,
    {
        let seed: Vec<(S, C)> = seed.into_iter().collect();
        for (site, _) in &seed {
            format::validate_site(site.as_ref())?;
        }

        self.state = State::Uninitialized;
        format::create(path)?;
        self.state = State::Ready(OpenVault {
            path: path.to_path_buf(),
            key: key.clone(),
            entries: BTreeMap::new(),
        });

        for (site, credential) in &seed {
            self.add_entry(site.as_ref(), credential.as_ref())?;
        }

        tracing::debug!(path = %path.display(), seeded = seed.len(), "vault created");
        Ok(())
    }

    /// Rebuild the in-memory map from the vault file at `path`.
    ///
    /// The previous contents are discarded first.  Records that cannot
    /// be parsed or decrypted are skipped and reported in the returned
    /// `LoadReport`; a later record for a site overrides an earlier one.
    /// If the file cannot be read at all the store is left uninitialized.
    pub fn load(&mut self, path: &Path, key: &VaultKey) -> Result<LoadReport> {
        self.state = State::Uninitialized;

        let loaded = format::load_all(path, key)?;
        let entries: BTreeMap<String, String> = loaded.records.into_iter().collect();

        let report = LoadReport {
            entries: entries.len(),
            warnings: loaded.warnings,
        };

        self.state = State::Ready(OpenVault {
            path: path.to_path_buf(),
            key: key.clone(),
            entries,
        });

        tracing::debug!(
            path = %path.display(),
            entries = report.entries,
            skipped = report.warnings.len(),
            "vault loaded"
        );
        Ok(report)
    }

    /// Drop the decrypted entries and key, returning to the uninitialized state.
    pub fn close(&mut self) {
        self.state = State::Uninitialized;
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Add or overwrite the credential for `site`.
    ///
    /// The credential is encrypted and appended to the vault file before
    /// the in-memory map changes.  If the append fails the map keeps its
    /// previous value and `Persistence` is returned.
    pub fn add_entry(&mut self, site: &str, credential: &str) -> Result<AddOutcome> {
        format::validate_site(site)?;
        let vault = self.ready_mut()?;

        let token = encrypt_token(&vault.key, credential)?;
        format::append_record(&vault.path, site, &token).map_err(|source| {
            VaultError::Persistence {
                site: site.to_string(),
                source,
            }
        })?;

        let outcome = match vault.entries.insert(site.to_string(), credential.to_string()) {
            Some(mut previous) => {
                previous.zeroize();
                AddOutcome::Updated
            }
            None => AddOutcome::Inserted,
        };
        Ok(outcome)
    }

    /// Look up the credential stored for `site`.  No I/O is performed.
    pub fn get_entry(&self, site: &str) -> Result<Option<&str>> {
        Ok(self.ready()?.entries.get(site).map(String::as_str))
    }

    /// All known sites in lexicographic order.
    pub fn list_sites(&self) -> Result<Vec<&str>> {
        Ok(self.ready()?.entries.keys().map(String::as_str).collect())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns `true` once `create` or `load` has succeeded.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// Path of the bound vault file, if any.
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            State::Ready(vault) => Some(&vault.path),
            State::Uninitialized => None,
        }
    }

    /// Number of entries held in memory.
    pub fn len(&self) -> usize {
        match &self.state {
            State::Ready(vault) => vault.entries.len(),
            State::Uninitialized => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ready(&self) -> Result<&OpenVault> {
        match &self.state {
            State::Ready(vault) => Ok(vault),
            State::Uninitialized => Err(not_ready()),
        }
    }

    fn ready_mut(&mut self) -> Result<&mut OpenVault> {
        match &mut self.state {
            State::Ready(vault) => Ok(vault),
            State::Uninitialized => Err(not_ready()),
        }
    }
}

fn not_ready() -> VaultError {
    VaultError::Precondition("create or load a vault file first".into())
}
