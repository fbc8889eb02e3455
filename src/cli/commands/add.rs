//! `credvault add` — add or update the credential for a site.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{compose_credential, open_session, read_password, resolve_paths, Cli};
use crate::errors::Result;
use crate::vault::AddOutcome;

/// Execute the `add` command.
pub fn execute(cli: &Cli, site: &str, username: Option<&str>, password: Option<&str>) -> Result<()> {
    let paths = resolve_paths(cli)?;

    let password = read_password(site, password)?;
    let credential = Zeroizing::new(compose_credential(username, &password));

    let mut session = open_session(&paths)?;
    let outcome = session.add_entry(site, &credential)?;
    let total = session.vault().len();

    match outcome {
        AddOutcome::Inserted => {
            output::success(&format!("Added credential for '{site}' ({total} total)"));
        }
        AddOutcome::Updated => {
            output::success(&format!("Updated credential for '{site}' ({total} total)"));
        }
    }

    Ok(())
}
