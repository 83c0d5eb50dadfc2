//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vaultpub")]
#[command(author, version, about = "Export the public notes of an Obsidian-style vault", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides VAULTPUB_VAULT and the config file)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Config file (defaults to <config dir>/vaultpub/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify notes and write the publish lists
    Export(ExportArgs),

    /// Show how notes are classified, without writing anything
    Report(ReportArgs),

    /// Show a note's resolved outgoing links
    Links(LinksArgs),

    /// Print the effective configuration
    Config,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Compute the lists but do not write them
    #[arg(long)]
    pub dry_run: bool,

    /// Open each written list (uses `open_command` from the config)
    #[arg(long)]
    pub open: bool,

    /// Source folder to classify (repeatable; replaces the configured sources)
    #[arg(long = "source", value_name = "DIR")]
    pub sources: Vec<String>,

    /// Output folder, relative to the vault
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Source folder to classify (repeatable; replaces the configured sources)
    #[arg(long = "source", value_name = "DIR")]
    pub sources: Vec<String>,

    /// Only show one bucket
    #[arg(long, value_enum)]
    pub bucket: Option<BucketArg>,
}

#[derive(Args, Debug)]
pub struct LinksArgs {
    /// Note path or name
    pub note: String,

    /// Only show attachments
    #[arg(long)]
    pub attachments_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BucketArg {
    Public,
    Private,
    Unlisted,
    Missing,
}

impl From<BucketArg> for crate::types::Visibility {
    fn from(arg: BucketArg) -> Self {
        match arg {
            BucketArg::Public => Self::Public,
            BucketArg::Private => Self::Private,
            BucketArg::Unlisted => Self::Unlisted,
            BucketArg::Missing => Self::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export() {
        let cli = Cli::parse_from([
            "vaultpub", "--vault", "/v", "export", "--dry-run", "--source", "knowledge", "--source", "recipes",
        ]);
        assert_eq!(cli.vault, Some(PathBuf::from("/v")));
        match cli.command {
            Commands::Export(args) => {
                assert!(args.dry_run);
                assert_eq!(args.sources, vec!["knowledge", "recipes"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_output_format() {
        let cli = Cli::parse_from(["vaultpub", "--yaml", "config"]);
        assert_eq!(cli.output_format(), OutputFormat::Yaml);
        let cli = Cli::parse_from(["vaultpub", "report", "--bucket", "missing"]);
        assert_eq!(cli.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_conflicting_formats_rejected() {
        assert!(Cli::try_parse_from(["vaultpub", "--json", "--toml", "config"]).is_err());
    }
}
