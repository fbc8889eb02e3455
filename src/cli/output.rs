//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::LoadWarning;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print one warning per record skipped during a vault load.
pub fn load_warnings(warnings: &[LoadWarning]) {
    for w in warnings {
        warning(&w.to_string());
    }
}

/// Print a stored credential, splitting `username:password` when present.
pub fn credential(value: &str) {
    match super::split_credential(value) {
        (Some(user), password) => {
            println!("Username: {user}");
            println!("Password: {password}");
        }
        (None, password) => println!("Password: {password}"),
    }
}

/// Print a one-column table of site names.
pub fn print_sites_table(sites: &[&str]) {
    if sites.is_empty() {
        info("No entries in this vault yet.");
        tip("Run `credvault add <SITE>` to add your first credential.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Site"]);

    for site in sites {
        table.add_row(vec![*site]);
    }

    println!("{table}");
}
