//! Output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::error::Result;
use serde::Serialize;

/// Helper for printing results to stdout and diagnostics to stderr.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
    verbose: u8,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool, verbose: u8) -> Self {
        Self { format, quiet, verbose }
    }

    /// Render a serializable value in the configured format.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Toml => toml::to_string_pretty(value)?,
        })
    }

    /// Print a serializable value in the configured format.
    pub fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", self.render(value)?);
        Ok(())
    }

    /// Print a message only with `-v`.
    pub fn debug(&self, message: &str) {
        if !self.quiet && self.verbose > 0 {
            eprintln!("{}", message);
        }
    }

    /// Print a warning message.
    pub fn warn(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        total: usize,
        paths: Vec<String>,
    }

    fn sample() -> Sample {
        Sample {
            total: 1,
            paths: vec!["knowledge/a.md".to_string()],
        }
    }

    #[test]
    fn test_render_json() {
        let out = Output::new(OutputFormat::Json, false, 0);
        let text = out.render(&sample()).unwrap();
        assert!(text.contains("\"total\": 1"));
    }

    #[test]
    fn test_render_yaml_and_toml() {
        let yaml = Output::new(OutputFormat::Yaml, false, 0).render(&sample()).unwrap();
        assert!(yaml.contains("total: 1"));
        let toml = Output::new(OutputFormat::Toml, true, 0).render(&sample()).unwrap();
        assert!(toml.contains("total = 1"));
    }
}
