//! Partition notes into visibility buckets.

use crate::types::{NoteRecord, Visibility};
use serde::Serialize;

/// Notes matching `visibility`, in input order.
pub fn classify(notes: &[NoteRecord], visibility: Visibility) -> Vec<NoteRecord> {
    notes
        .iter()
        .filter(|note| note.visibility() == visibility)
        .cloned()
        .collect()
}

/// Notes whose raw visibility equals `tag` exactly, in input order.
///
/// `"missing"` selects the notes with no recognized visibility. Any other
/// unknown spelling selects nothing.
pub fn classify_str(notes: &[NoteRecord], tag: &str) -> Vec<NoteRecord> {
    match tag {
        "public" => classify(notes, Visibility::Public),
        "private" => classify(notes, Visibility::Private),
        "unlisted" => classify(notes, Visibility::Unlisted),
        "missing" => classify(notes, Visibility::Missing),
        _ => Vec::new(),
    }
}

/// All four buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Buckets {
    pub public: Vec<NoteRecord>,
    pub private: Vec<NoteRecord>,
    pub unlisted: Vec<NoteRecord>,
    pub missing: Vec<NoteRecord>,
}

impl Buckets {
    pub fn get(&self, visibility: Visibility) -> &[NoteRecord] {
        match visibility {
            Visibility::Public => &self.public,
            Visibility::Private => &self.private,
            Visibility::Unlisted => &self.unlisted,
            Visibility::Missing => &self.missing,
        }
    }

    pub fn total(&self) -> usize {
        self.public.len() + self.private.len() + self.unlisted.len() + self.missing.len()
    }
}

/// Partition `notes` into buckets in one pass. Every note lands in exactly
/// one bucket and keeps its relative order.
pub fn partition(notes: &[NoteRecord]) -> Buckets {
    let mut buckets = Buckets::default();
    for note in notes {
        let bucket = match note.visibility() {
            Visibility::Public => &mut buckets.public,
            Visibility::Private => &mut buckets.private,
            Visibility::Unlisted => &mut buckets.unlisted,
            Visibility::Missing => &mut buckets.missing,
        };
        bucket.push(note.clone());
    }
    buckets
}
