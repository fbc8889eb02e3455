//! `credvault keygen` — generate a new key file.

use crate::cli::output;
use crate::cli::{resolve_paths, Cli};
use crate::errors::{Result, VaultError};
use crate::session::Session;

/// Execute the `keygen` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let paths = resolve_paths(cli)?;

    // A replaced key makes every existing record unreadable.
    if paths.key_file.exists() && !force {
        return Err(VaultError::KeyFileExists(paths.key_file));
    }

    let mut session = Session::new();
    let key = session.create_key(&paths.key_file)?;

    output::success(&format!(
        "Key created and saved to {} (fingerprint {})",
        paths.key_file.display(),
        key.fingerprint()
    ));
    output::tip("Keep this file safe: without it the vault cannot be decrypted.");
    output::tip("Run `credvault init` to create a vault file.");

    Ok(())
}
