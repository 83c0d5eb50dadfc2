//! vaultpub CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use vaultpub::cli::args::{Cli, Commands};
use vaultpub::cli::output::Output;
use vaultpub::cli::{export, links, report};
use vaultpub::config::Config;
use vaultpub::error::{ExitCode as PublishExitCode, PublishError};
use vaultpub::vault::Vault;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<PublishExitCode, PublishError> {
    let config = Config::load(cli.config.as_deref())?;
    let output = Output::new(cli.output_format(), cli.quiet, cli.verbose);

    if let Commands::Config = cli.command {
        output.print(&config)?;
        return Ok(PublishExitCode::Success);
    }

    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = Vault::new(vault_path)?;

    match &cli.command {
        Commands::Export(args) => export::run(&vault, &config, args, &output),
        Commands::Report(args) => {
            report::run(&vault, &config, args, &output)?;
            Ok(PublishExitCode::Success)
        }
        Commands::Links(args) => {
            links::run(&vault, args, &output)?;
            Ok(PublishExitCode::Success)
        }
        Commands::Config => Ok(PublishExitCode::Success),
    }
}
