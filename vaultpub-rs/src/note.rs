//! Note representation.

use crate::error::Result;
use crate::parser::{self, parse_outlinks, scalar_field};
use crate::types::Link;
use serde_yaml::Value as YamlValue;
use std::path::{Path, PathBuf};

/// Frontmatter key holding the publication status.
pub const VISIBILITY_KEY: &str = "visibility";

/// A markdown note loaded from the vault.
#[derive(Debug, Clone)]
pub struct Note {
    /// Path relative to vault root (e.g., "knowledge/Rust.md").
    pub path: PathBuf,

    /// Raw content of the note.
    pub content: String,
}

impl Note {
    /// Create a note from path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Load a note from disk.
    pub fn load(vault_root: &Path, relative_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(vault_root.join(relative_path))?;
        Ok(Self::new(relative_path, content))
    }

    /// The vault-relative path with `/` separators.
    pub fn path_str(&self) -> String {
        self.path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Folder containing the note, `/`-separated; empty at the vault root.
    pub fn folder_str(&self) -> String {
        let path = self.path_str();
        match path.rsplit_once('/') {
            Some((folder, _)) => folder.to_string(),
            None => String::new(),
        }
    }

    /// Parse frontmatter as YAML.
    pub fn frontmatter(&self) -> Result<Option<YamlValue>> {
        parser::parse_frontmatter(&self.content, &self.path)
    }

    /// The raw `visibility` value from parsed frontmatter.
    pub fn visibility(frontmatter: Option<&YamlValue>) -> Option<String> {
        frontmatter.and_then(|fm| scalar_field(fm, VISIBILITY_KEY))
    }

    /// All outgoing links, unresolved, in document order.
    pub fn links(&self, frontmatter: Option<&YamlValue>) -> Vec<Link> {
        parse_outlinks(&self.content, frontmatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths() {
        let note = Note::new("knowledge/sub/Topic.md", "");
        assert_eq!(note.path_str(), "knowledge/sub/Topic.md");
        assert_eq!(note.folder_str(), "knowledge/sub");
        assert_eq!(Note::new("Root.md", "").folder_str(), "");
    }

    #[test]
    fn test_visibility_from_frontmatter() {
        let note = Note::new("a.md", "---\nvisibility: public\n---\nBody");
        let fm = note.frontmatter().unwrap();
        assert_eq!(Note::visibility(fm.as_ref()), Some("public".to_string()));

        let bare = Note::new("b.md", "No frontmatter");
        assert_eq!(Note::visibility(bare.frontmatter().unwrap().as_ref()), None);
    }

    #[test]
    fn test_links() {
        let note = Note::new("a.md", "---\nvisibility: private\n---\n![[x.png]] [y](y.pdf)");
        let fm = note.frontmatter().unwrap();
        let targets: Vec<String> = note.links(fm.as_ref()).into_iter().map(|l| l.target).collect();
        assert_eq!(targets, vec!["x.png", "y.pdf"]);
    }

    #[test]
    fn test_load() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("knowledge")).unwrap();
        std::fs::write(dir.path().join("knowledge/n.md"), "hello").unwrap();

        let note = Note::load(dir.path(), Path::new("knowledge/n.md")).unwrap();
        assert_eq!(note.content, "hello");
        assert_eq!(note.path_str(), "knowledge/n.md");
    }
}
