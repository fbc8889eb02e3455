//! Symmetric key generation, persistence, and the per-session `KeyStore`.
//!
//! A key file holds exactly the 32 raw key bytes: no header, no
//! metadata.  Anything of a different length is rejected on load.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::errors::{Result, VaultError};

/// Length of an AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// Number of hash bytes shown in a key fingerprint.
const FINGERPRINT_LEN: usize = 9;

/// A wrapper around the 32-byte vault key that automatically zeroes
/// its memory when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Create a new `VaultKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Build a key from a byte slice, checking its length.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_LEN] = data.try_into().map_err(|_| VaultError::InvalidKey {
            expected: KEY_LEN,
            actual: data.len(),
        })?;
        Ok(Self { bytes })
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Short, display-safe identifier for this key.
    ///
    /// URL-safe base64 of a truncated SHA-256 over the key bytes, so two
    /// sessions can tell whether they hold the same key without ever
    /// printing the key itself.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.bytes);
        URL_SAFE_NO_PAD.encode(&digest[..FINGERPRINT_LEN])
    }
}

impl fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultKey")
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

/// Generate a new random key from the operating system CSPRNG.
///
/// Nothing is written to disk; see `save_key`.
pub fn generate_key() -> VaultKey {
    let mut bytes = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut bytes);
    let key = VaultKey::new(bytes);
    bytes.zeroize();
    key
}

/// Write the raw key bytes to `path`, replacing any existing file.
///
/// The parent directory must already exist.  On Unix the file is
/// restricted to owner-only read/write.
pub fn save_key(key: &VaultKey, path: &Path) -> Result<()> {
    let mut file = fs::File::create(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(key.as_bytes())?;
    file.sync_all()?;

    tracing::debug!(path = %path.display(), fingerprint = %key.fingerprint(), "key saved");
    Ok(())
}

/// Load a key file from disk and validate its length.
pub fn load_key(path: &Path) -> Result<VaultKey> {
    let mut data = fs::read(path)?;
    let key = VaultKey::from_slice(&data);
    data.zeroize();
    let key = key?;

    tracing::debug!(path = %path.display(), fingerprint = %key.fingerprint(), "key loaded");
    Ok(key)
}

/// Holds at most one key for the current session.
///
/// Generating or loading replaces whatever key was held before.
#[derive(Debug, Default)]
pub struct KeyStore {
    current: Option<VaultKey>,
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held key with `key`.
    pub fn set(&mut self, key: VaultKey) -> &VaultKey {
        self.current.insert(key)
    }

    /// Replace the held key with the one stored at `path`.
    ///
    /// On failure the previously held key is kept.
    pub fn load(&mut self, path: &Path) -> Result<&VaultKey> {
        let key = load_key(path)?;
        Ok(self.current.insert(key))
    }

    /// The held key, or a precondition error if none was generated or loaded.
    pub fn key(&self) -> Result<&VaultKey> {
        self.current
            .as_ref()
            .ok_or_else(|| VaultError::Precondition("load or create a key first".into()))
    }

    pub fn has_key(&self) -> bool {
        self.current.is_some()
    }
}
