//! Export command: the publish trigger.

use crate::cli::args::ExportArgs;
use crate::cli::output::Output;
use crate::config::Config;
use crate::error::{ExitCode, Result};
use crate::publish::export;
use crate::storage::FsStorage;
use crate::vault::Vault;

/// Platform command used by `--open` when none is configured.
pub fn default_open_command() -> String {
    if cfg!(target_os = "macos") {
        "open".to_string()
    } else if cfg!(windows) {
        "explorer".to_string()
    } else {
        "xdg-open".to_string()
    }
}

/// Apply command-line overrides to the loaded config.
pub fn effective_config(config: &Config, args: &ExportArgs) -> Config {
    let mut config = config.clone();
    if !args.sources.is_empty() {
        config.sources = args.sources.clone();
    }
    if let Some(ref dir) = args.output_dir {
        config.output_dir = dir.clone();
    }
    config
}

pub fn run(vault: &Vault, config: &Config, args: &ExportArgs, output: &Output) -> Result<ExitCode> {
    let config = effective_config(config, args);

    let open_command = args
        .open
        .then(|| config.open_command.clone().unwrap_or_else(default_open_command));

    let storage = FsStorage::new(&vault.root)
        .create_dirs(config.create_dirs)
        .open_with(open_command)
        .quiet(output.is_quiet());

    output.debug(&format!(
        "Exporting from {} (sources: {})",
        vault.root.display(),
        config.sources.join(", ")
    ));

    let report = export(vault, &storage, &config, args.dry_run)?;

    for warning in &report.warnings {
        output.warn(warning);
    }
    output.debug(&format!("Missed notes: {}", report.missed_notes.join(", ")));
    output.debug(&format!(
        "Attachments to check: {}",
        report.attachments_to_check.join(", ")
    ));

    output.print(&report)?;

    if report.is_success() {
        Ok(ExitCode::Success)
    } else {
        for file in report.files.iter().filter(|f| f.error.is_some()) {
            output.error(file.error.as_deref().unwrap_or("write failed"));
        }
        Ok(ExitCode::WriteFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(sources: &[&str], output_dir: Option<&str>) -> ExportArgs {
        ExportArgs {
            dry_run: false,
            open: false,
            sources: sources.iter().map(|s| s.to_string()).collect(),
            output_dir: output_dir.map(String::from),
        }
    }

    #[test]
    fn test_effective_config_keeps_defaults() {
        let config = effective_config(&Config::default(), &args(&[], None));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_effective_config_overrides() {
        let config = effective_config(&Config::default(), &args(&["notes"], Some("out")));
        assert_eq!(config.sources, vec!["notes"]);
        assert_eq!(config.output_dir, "out");
    }
}
