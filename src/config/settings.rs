use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Project-level configuration, loaded from `.credvault.toml`.
///
/// Every field has a sensible default so CredVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Key file path, relative to the project directory.
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Vault file path, relative to the project directory.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_key_file() -> String {
    "vault.key".to_string()
}

fn default_vault_file() -> String {
    "vault.txt".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_file: default_key_file(),
            vault_file: default_vault_file(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".credvault.toml";

    /// Load settings from `<project_dir>/.credvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the key file path against `project_dir`.
    pub fn key_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.key_file)
    }

    /// Resolve the vault file path against `project_dir`.
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
