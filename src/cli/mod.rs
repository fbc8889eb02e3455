//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::session::Session;

/// CredVault CLI: local encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Local encrypted credential vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Key file path (default: from .credvault.toml, else vault.key)
    #[arg(long, global = true)]
    pub key_file: Option<String>,

    /// Vault file path (default: from .credvault.toml, else vault.txt)
    #[arg(long, global = true)]
    pub vault_file: Option<String>,

    /// Print diagnostic logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate a new key file
    Keygen {
        /// Overwrite an existing key file
        #[arg(short, long)]
        force: bool,
    },

    /// Create a new, empty vault file
    Init {
        /// Truncate an existing vault file
        #[arg(short, long)]
        force: bool,
    },

    /// Add or update the credential for a site
    Add {
        /// Site or app name (e.g. example.com)
        site: String,
        /// Username stored alongside the password as `username:password`
        #[arg(short, long)]
        username: Option<String>,
        /// Password (omit for piped input or interactive prompt)
        password: Option<String>,
    },

    /// Show the credential stored for a site
    Get {
        /// Site or app name
        site: String,
    },

    /// List all sites in the vault
    List,

    /// Interactive menu
    Menu,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolved key and vault file locations for this invocation.
#[derive(Debug, Clone)]
pub struct VaultPaths {
    pub key_file: PathBuf,
    pub vault_file: PathBuf,
}

/// Work out which key and vault files to use.
///
/// Command-line flags win over `.credvault.toml`, which wins over the
/// built-in defaults.  Relative paths resolve against the working directory.
pub fn resolve_paths(cli: &Cli) -> Result<VaultPaths> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;

    let key_file = match &cli.key_file {
        Some(p) => cwd.join(p),
        None => settings.key_path(&cwd),
    };
    let vault_file = match &cli.vault_file {
        Some(p) => cwd.join(p),
        None => settings.vault_path(&cwd),
    };

    Ok(VaultPaths {
        key_file,
        vault_file,
    })
}

/// Load the key and vault for a one-shot command, rendering any load warnings.
pub fn open_session(paths: &VaultPaths) -> Result<Session> {
    let mut session = Session::new();
    session.load_key(&paths.key_file)?;

    let report = session.load_vault(&paths.vault_file)?;
    output::load_warnings(&report.warnings);

    Ok(session)
}

/// Join an optional username and a password into the stored credential.
pub fn compose_credential(username: Option<&str>, password: &str) -> String {
    match username {
        Some(user) if !user.is_empty() => format!("{user}:{password}"),
        _ => password.to_string(),
    }
}

/// Split a stored credential back into `(username, password)`.
///
/// Splits at the first colon; a value without one is a bare password.
pub fn split_credential(value: &str) -> (Option<&str>, &str) {
    match value.split_once(':') {
        Some((user, password)) => (Some(user), password),
        None => (None, value),
    }
}

/// Get the password for `site`, trying in order:
/// 1. the value given on the command line
/// 2. piped stdin
/// 3. a hidden interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn read_password(site: &str, inline: Option<&str>) -> Result<Zeroizing<String>> {
    let password = if let Some(p) = inline {
        output::warning("Password provided on command line — it may appear in shell history.");
        Zeroizing::new(p.to_string())
    } else if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string())
    } else {
        prompt_password(site)?
    };

    require_password(password)
}

/// Reject an empty password; every front end stores only non-empty ones.
pub fn require_password(password: Zeroizing<String>) -> Result<Zeroizing<String>> {
    if password.is_empty() {
        return Err(VaultError::CommandFailed("password cannot be empty".into()));
    }
    Ok(password)
}

/// Hidden password prompt.
pub fn prompt_password(site: &str) -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt(format!("Password for {site}"))
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
