//! `credvault get` — print the credential stored for a site.

use crate::cli::output;
use crate::cli::{open_session, resolve_paths, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `get` command.
pub fn execute(cli: &Cli, site: &str) -> Result<()> {
    let paths = resolve_paths(cli)?;
    let session = open_session(&paths)?;

    let value = session
        .get_entry(site)?
        .ok_or_else(|| VaultError::EntryNotFound(site.to_string()))?;
    output::credential(value);

    Ok(())
}
