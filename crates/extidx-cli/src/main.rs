//! extidx CLI
//!
//! Resolves extension names to the download URL and digest of the artifact
//! to install.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose).map_err(|e| CliError::Logging(e.to_string()))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(&cli.host, cmd),
        None => {
            // No command provided - show help hint
            println!("{} Extension index resolver", "extidx".green().bold());
            println!();
            println!("Run {} for available commands.", "extidx --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(host_args: &cli::HostArgs, cmd: Commands) -> Result<()> {
    let host = context::detect_host(host_args)?;
    match cmd {
        Commands::Resolve {
            name,
            current,
            target,
            index,
            json,
        } => commands::run_resolve(
            &host,
            &name,
            current.as_deref(),
            target.as_deref(),
            index.as_deref(),
            json,
        ),
        Commands::ProjectUrl { name } => commands::run_project_url(&host, &name),
        Commands::Versions { name, index, json } => {
            commands::run_versions(&host, &name, index.as_deref(), json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_user() {
        let error = CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_no_candidates_exit_code() {
        let error = CliError::from(extidx_core::Error::NoCandidates(
            "No suitable extensions found.".into(),
        ));
        assert_eq!(error.exit_code(), error::EXIT_NO_CANDIDATES);
        assert_eq!(error.to_string(), "No suitable extensions found.");
    }
}
