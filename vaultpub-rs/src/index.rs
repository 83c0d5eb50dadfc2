//! The note query seam.
//!
//! The exporter never reads the vault itself; it asks a [`NoteIndex`] for the
//! notes under a set of source folders. [`crate::Vault`] is the on-disk
//! implementation and [`MemoryIndex`] serves prepared records.

use crate::error::{PublishError, Result};
use crate::types::NoteRecord;
use serde::Serialize;

/// Result of a note query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteQuery {
    /// Matching notes, in index order.
    pub notes: Vec<NoteRecord>,
    /// Non-fatal problems met while indexing.
    pub warnings: Vec<String>,
}

/// Supplies an ordered collection of note records.
pub trait NoteIndex {
    /// Return every note under any of `sources` (vault-relative folders).
    fn query(&self, sources: &[String]) -> Result<NoteQuery>;
}

/// Whether `path` lies under the vault-relative `folder`. An empty folder
/// selects everything.
pub fn in_folder(path: &str, folder: &str) -> bool {
    let folder = folder.trim_matches('/');
    folder.is_empty()
        || path
            .strip_prefix(folder)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// A note index over records already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    notes: Option<Vec<NoteRecord>>,
}

impl MemoryIndex {
    pub fn new(notes: Vec<NoteRecord>) -> Self {
        Self { notes: Some(notes) }
    }

    /// An index that fails every query.
    pub fn unavailable() -> Self {
        Self { notes: None }
    }
}

impl NoteIndex for MemoryIndex {
    fn query(&self, sources: &[String]) -> Result<NoteQuery> {
        let notes = self
            .notes
            .as_ref()
            .ok_or_else(|| PublishError::QueryUnavailable("no note index loaded".to_string()))?;

        // Records without a path pass through; the exporter reports them.
        let selected = notes
            .iter()
            .filter(|note| match note.path.as_deref() {
                Some(path) => sources.iter().any(|s| in_folder(path, s)),
                None => true,
            })
            .cloned()
            .collect();

        Ok(NoteQuery {
            notes: selected,
            warnings: Vec::new(),
        })
    }
}
