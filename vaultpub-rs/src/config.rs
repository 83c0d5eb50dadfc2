//! Export configuration.

use crate::error::{PublishError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured vault path.
pub const VAULT_ENV: &str = "VAULTPUB_VAULT";

/// Folders queried when no sources are configured.
pub const DEFAULT_SOURCES: [&str; 3] = ["knowledge", "week-notes", "recipes"];

/// Default output folder, relative to the vault root.
pub const DEFAULT_OUTPUT_DIR: &str = "utils/publish";

/// Settings for an export run. Passed explicitly into the exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default vault root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<PathBuf>,

    /// Vault-relative folders whose notes are classified.
    pub sources: Vec<String>,

    /// Vault-relative folder the five lists are written to.
    pub output_dir: String,

    /// Create the output folder if it does not exist.
    pub create_dirs: bool,

    /// Command used to open written lists (e.g. `xdg-open`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_command: Option<String>,

    /// Free-text setting. Not read by the export.
    pub my_setting: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault: None,
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            create_dirs: true,
            open_command: None,
            my_setting: "default".to_string(),
        }
    }
}

impl Config {
    /// Default config file location: `<config dir>/vaultpub/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vaultpub").join("config.toml"))
    }

    /// Load config from `path`, or from the default location.
    ///
    /// An explicitly given file must exist. A missing default file yields the
    /// default config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load and parse a TOML config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PublishError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
            .map_err(|e| PublishError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Parse config from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.output_dir.trim().is_empty() {
            return Err(PublishError::ConfigError("output_dir must not be empty".to_string()));
        }
        if Path::new(&self.output_dir).is_absolute() {
            return Err(PublishError::ConfigError(format!(
                "output_dir must be relative to the vault: {}",
                self.output_dir
            )));
        }
        Ok(())
    }

    /// Resolve the vault root: CLI flag, then `VAULTPUB_VAULT`, then the
    /// config file, then the current directory.
    pub fn resolve_vault_path(&self, cli_vault: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_vault {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = std::env::var_os(VAULT_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if let Some(ref path) = self.vault {
            return Ok(path.clone());
        }
        Ok(std::env::current_dir()?)
    }

    /// Vault-relative destination for an output file.
    pub fn destination(&self, file_name: &str) -> String {
        format!("{}/{}", self.output_dir.trim_end_matches('/'), file_name)
    }
}
