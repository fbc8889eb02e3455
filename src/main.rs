use clap::Parser;
use credvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // `RUST_LOG` wins; otherwise only errors, or crate debug logs with --verbose.
    let default_filter = if cli.verbose { "credvault=debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Keygen { force } => credvault::cli::commands::keygen::execute(&cli, force),
        Commands::Init { force } => credvault::cli::commands::init::execute(&cli, force),
        Commands::Add {
            ref site,
            ref username,
            ref password,
        } => credvault::cli::commands::add::execute(
            &cli,
            site,
            username.as_deref(),
            password.as_deref(),
        ),
        Commands::Get { ref site } => credvault::cli::commands::get::execute(&cli, site),
        Commands::List => credvault::cli::commands::list::execute(&cli),
        Commands::Menu => credvault::cli::commands::menu::execute(&cli),
    };

    if let Err(e) = result {
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
