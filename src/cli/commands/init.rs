//! `credvault init` — create a new, empty vault file.

use crate::cli::output;
use crate::cli::{resolve_paths, Cli};
use crate::errors::{Result, VaultError};
use crate::session::Session;

/// Execute the `init` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let paths = resolve_paths(cli)?;

    if paths.vault_file.exists() && !force {
        output::tip("Use `credvault add` to add credentials to the existing vault.");
        return Err(VaultError::VaultAlreadyExists(paths.vault_file));
    }

    let mut session = Session::new();
    session.load_key(&paths.key_file)?;
    session.create_vault(&paths.vault_file)?;

    output::success(&format!(
        "Vault file created at {}",
        paths.vault_file.display()
    ));
    output::tip("Run `credvault add <SITE>` to add a credential.");

    Ok(())
}
