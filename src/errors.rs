use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in CredVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Key errors ---
    #[error("Invalid key: expected {expected} bytes, got {actual}")]
    InvalidKey { expected: usize, actual: usize },

    #[error("Key file already exists at {0} (use --force to overwrite)")]
    KeyFileExists(PathBuf),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    // --- Vault errors ---
    #[error("{0}")]
    Precondition(String),

    #[error("Invalid site name: {0}")]
    InvalidSite(String),

    #[error("Vault already exists at {0} (use --force to recreate it)")]
    VaultAlreadyExists(PathBuf),

    #[error("Failed to persist entry for '{site}': {source}")]
    Persistence {
        site: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No entry for site '{0}'")]
    EntryNotFound(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for CredVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
