//! `credvault list` — display all sites in a table.

use crate::cli::output;
use crate::cli::{open_session, resolve_paths, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let paths = resolve_paths(cli)?;
    let session = open_session(&paths)?;

    let sites = session.list_sites()?;
    output::info(&format!("{} site(s)", sites.len()));
    output::print_sites_table(&sites);

    Ok(())
}
