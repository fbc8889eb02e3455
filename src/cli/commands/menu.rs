//! `credvault menu` — interactive session over one key and one vault.
//!
//! Unlike the one-shot commands, the menu keeps a single `Session`
//! alive, so keys and vault files can be created, swapped, and
//! reloaded without restarting the process.

use std::path::PathBuf;

use dialoguer::{Input, Select};
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{
    compose_credential, prompt_password, require_password, resolve_paths, Cli, VaultPaths,
};
use crate::errors::{Result, VaultError};
use crate::session::Session;
use crate::vault::AddOutcome;

const ITEMS: [&str; 8] = [
    "Create new key file",
    "Load key file",
    "Create new vault file",
    "Load existing vault file",
    "Add / update a credential",
    "Get credential by site",
    "List sites",
    "Exit",
];

/// Execute the `menu` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let defaults = resolve_paths(cli)?;
    let mut session = Session::new();

    loop {
        let choice = Select::new()
            .with_prompt("CredVault")
            .items(&ITEMS)
            .default(0)
            .interact_opt()
            .map_err(|e| VaultError::CommandFailed(format!("menu prompt: {e}")))?;

        // Esc / q leaves the menu like "Exit".
        let Some(choice) = choice else { break };
        if choice == ITEMS.len() - 1 {
            break;
        }

        // Errors are reported and the menu keeps running.
        if let Err(e) = run_choice(&mut session, &defaults, choice) {
            output::error(&e.to_string());
        }
    }

    output::info("Bye!");
    Ok(())
}

fn run_choice(session: &mut Session, defaults: &VaultPaths, choice: usize) -> Result<()> {
    match choice {
        0 => {
            let path = ask_path("Key file path", &defaults.key_file)?;
            let key = session.create_key(&path)?;
            output::success(&format!(
                "Key created and saved to {} (fingerprint {})",
                path.display(),
                key.fingerprint()
            ));
        }
        1 => {
            let path = ask_path("Key file path to load", &defaults.key_file)?;
            let key = session.load_key(&path)?;
            output::success(&format!(
                "Key loaded from {} (fingerprint {})",
                path.display(),
                key.fingerprint()
            ));
        }
        2 => {
            session.key_store().key()?;
            let path = ask_path("Vault file path", &defaults.vault_file)?;
            session.create_vault(&path)?;
            output::success(&format!("Vault file created at {}", path.display()));
        }
        3 => {
            session.key_store().key()?;
            let path = ask_path("Vault file path to load", &defaults.vault_file)?;
            let report = session.load_vault(&path)?;
            output::load_warnings(&report.warnings);
            output::success(&format!(
                "Loaded {} entries from {}",
                report.entries,
                path.display()
            ));
        }
        4 => {
            // Fail before prompting for anything sensitive.
            session.list_sites()?;

            let site = ask_text("Site/App name", false)?;
            let username = ask_text("Username (optional)", true)?;
            let password = require_password(prompt_password(&site)?)?;
            let credential =
                Zeroizing::new(compose_credential(Some(username.as_str()), &password));

            match session.add_entry(&site, &credential)? {
                AddOutcome::Inserted => output::success(&format!("Added credential for '{site}'")),
                AddOutcome::Updated => output::success(&format!("Updated credential for '{site}'")),
            }
        }
        5 => {
            session.list_sites()?;
            let site = ask_text("Site/App to fetch", false)?;
            match session.get_entry(&site)? {
                Some(value) => output::credential(value),
                None => output::info("Not found."),
            }
        }
        6 => {
            let sites = session.list_sites()?;
            output::print_sites_table(&sites);
        }
        _ => {}
    }
    Ok(())
}

fn ask_path(prompt: &str, default: &std::path::Path) -> Result<PathBuf> {
    let raw = Input::<String>::new()
        .with_prompt(prompt)
        .default(default.display().to_string())
        .interact_text()
        .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(PathBuf::from(raw.trim()))
}

fn ask_text(prompt: &str, allow_empty: bool) -> Result<String> {
    let raw = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text()
        .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(raw.trim().to_string())
}
