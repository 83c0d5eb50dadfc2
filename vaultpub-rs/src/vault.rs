//! Vault representation and the on-disk note index.

use crate::error::{PublishError, Result};
use crate::index::{in_folder, NoteIndex, NoteQuery};
use crate::note::Note;
use crate::resolution::LinkResolver;
use crate::types::{NoteRecord, OutLink};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};

/// Represents an Obsidian vault.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,
}

impl Vault {
    /// Open a vault. The root must be an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(PublishError::VaultNotFound(root));
        }

        Ok(Self { root })
    }

    /// Get the full path for a vault-relative path.
    pub fn full_path(&self, relative_path: &Path) -> PathBuf {
        self.root.join(relative_path)
    }

    /// Check if a note exists.
    pub fn note_exists(&self, relative_path: &Path) -> bool {
        self.full_path(relative_path).is_file()
    }

    /// Load a note from the vault.
    pub fn load_note(&self, relative_path: &Path) -> Result<Note> {
        if !self.note_exists(relative_path) {
            return Err(PublishError::NoteNotFound(relative_path.to_path_buf()));
        }
        Note::load(&self.root, relative_path)
    }

    /// List every non-hidden file in the vault as a `/`-separated relative
    /// path, sorted. Entries that cannot be read are reported as warnings.
    pub fn list_files(&self) -> Result<FileListing> {
        let pattern = format!("{}/**/*", Pattern::escape(&self.root.to_string_lossy()));
        Ok(collect_files(&self.root, glob(&pattern)?))
    }

    /// List markdown notes in the vault, sorted.
    pub fn list_notes(&self) -> Result<Vec<String>> {
        Ok(self
            .list_files()?
            .files
            .into_iter()
            .filter(|f| f.ends_with(".md"))
            .collect())
    }

    /// Resolve a user-supplied note name or path to a vault-relative note.
    pub fn resolve_note(&self, query: &str) -> Result<PathBuf> {
        let resolver = LinkResolver::new(self.list_notes()?);
        resolver
            .resolve(query, "")
            .filter(|p| p.ends_with(".md"))
            .map(PathBuf::from)
            .ok_or_else(|| PublishError::NoteNotFound(PathBuf::from(query)))
    }

    /// Turn a loaded note into a classifier record, resolving its links.
    ///
    /// Invalid frontmatter leaves the visibility absent and adds a warning.
    pub fn record(&self, note: &Note, resolver: &LinkResolver, warnings: &mut Vec<String>) -> NoteRecord {
        let frontmatter = match note.frontmatter() {
            Ok(fm) => fm,
            Err(e) => {
                warnings.push(e.to_string());
                None
            }
        };

        let folder = note.folder_str();
        let outlinks = note
            .links(frontmatter.as_ref())
            .into_iter()
            .map(|link| {
                let path = resolver
                    .resolve(&link.target, &folder)
                    .unwrap_or(link.target);
                OutLink::new(path)
            })
            .collect();

        NoteRecord {
            path: Some(note.path_str()),
            visibility: Note::visibility(frontmatter.as_ref()),
            outlinks,
        }
    }
}

/// Files found by a vault scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileListing {
    /// Vault-relative paths, `/`-separated, sorted.
    pub files: Vec<String>,
    /// Entries that could not be read.
    pub warnings: Vec<String>,
}

fn collect_files<E: std::fmt::Display>(
    root: &Path,
    entries: impl IntoIterator<Item = std::result::Result<PathBuf, E>>,
) -> FileListing {
    let mut listing = FileListing::default();

    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                listing.warnings.push(format!("Skipping unreadable path: {}", e));
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        // Skip hidden files and directories
        if parts.iter().any(|p| p.starts_with('.')) {
            continue;
        }
        listing.files.push(parts.join("/"));
    }

    listing.files.sort();
    listing
}

impl NoteIndex for Vault {
    fn query(&self, sources: &[String]) -> Result<NoteQuery> {
        let present: Vec<&String> = sources
            .iter()
            .filter(|s| self.root.join(s.trim_matches('/')).is_dir())
            .collect();

        if present.is_empty() {
            return Err(PublishError::QueryUnavailable(format!(
                "none of the source folders exist in {}: {}",
                self.root.display(),
                sources.join(", ")
            )));
        }

        let FileListing { files, warnings } = self.list_files()?;
        let resolver = LinkResolver::new(files.iter().cloned());

        let mut query = NoteQuery {
            warnings,
            ..NoteQuery::default()
        };

        for path in files
            .iter()
            .filter(|f| f.ends_with(".md"))
            .filter(|f| present.iter().any(|s| in_folder(f, s)))
        {
            match Note::load(&self.root, Path::new(path)) {
                Ok(note) => {
                    let record = self.record(&note, &resolver, &mut query.warnings);
                    query.notes.push(record);
                }
                Err(e) => query.warnings.push(format!("Skipping {}: {}", path, e)),
            }
        }

        Ok(query)
    }
}
