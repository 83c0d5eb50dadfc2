//! Shared types for vaultpub.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A link or embed found in a note, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The raw link target (heading and block references stripped).
    pub target: String,

    /// Optional display text (wikilink alias or markdown link text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Optional heading reference (the part after #, before ^).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    /// Optional block reference (the part after #^).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,

    /// Whether this is an embed (`![[...]]` or `![](...)`).
    pub embed: bool,

    /// Which syntax the link was written in.
    pub syntax: LinkSyntax,

    /// Line number where this link appears (1-indexed).
    pub line: usize,
}

/// Link syntax flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkSyntax {
    /// `[[target]]`
    Wiki,
    /// `[text](target)`
    Markdown,
    /// A wikilink inside a frontmatter value.
    Frontmatter,
}

/// Declared publication status of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Unlisted,
    Missing,
}

impl Visibility {
    /// All buckets, in report order.
    pub const ALL: [Visibility; 4] = [
        Visibility::Public,
        Visibility::Private,
        Visibility::Unlisted,
        Visibility::Missing,
    ];

    /// Classify a raw visibility value. Matching is exact and case-sensitive;
    /// anything unrecognized (including absent or empty) is `Missing`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("public") => Visibility::Public,
            Some("private") => Visibility::Private,
            Some("unlisted") => Visibility::Unlisted,
            _ => Visibility::Missing,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Unlisted => "unlisted",
            Visibility::Missing => "missing",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing link with a resolved target path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutLink {
    /// Vault-relative target path, or the raw target if it did not resolve.
    pub path: String,
}

impl OutLink {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The substring after the last `.` in the path. A path with no dot, or
    /// ending in a dot, has no extension. Slashes are not special: the
    /// extension of `a.b/c` is `b/c`.
    pub fn extension(&self) -> Option<&str> {
        match self.path.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Some(ext),
            _ => None,
        }
    }
}

/// A note as seen by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Vault-relative path. `None` marks a malformed record.
    pub path: Option<String>,

    /// Raw visibility value from frontmatter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    /// Outgoing links in document order.
    #[serde(default)]
    pub outlinks: Vec<OutLink>,
}

impl NoteRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn with_visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }

    pub fn with_outlink(mut self, path: impl Into<String>) -> Self {
        self.outlinks.push(OutLink::new(path));
        self
    }

    /// The bucket this note belongs to.
    pub fn visibility(&self) -> Visibility {
        Visibility::from_tag(self.visibility.as_deref())
    }
}

/// Paths derived from a set of notes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExportPaths {
    pub note_paths: Vec<String>,
    pub attachment_paths: Vec<String>,
    pub paths_to_check: Vec<String>,
}

/// The five lists written by an export run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PublishLists {
    pub missed_notes: Vec<String>,
    pub notes: Vec<String>,
    pub attachments: Vec<String>,
    pub everything: Vec<String>,
    pub attachments_to_check: Vec<String>,
}

/// One of the five output lists, with its fixed file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublishList {
    MissedNotes,
    Notes,
    Attachments,
    Everything,
    AttachmentsToCheck,
}

impl PublishList {
    /// Write order.
    pub const ALL: [PublishList; 5] = [
        PublishList::Notes,
        PublishList::Attachments,
        PublishList::Everything,
        PublishList::AttachmentsToCheck,
        PublishList::MissedNotes,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            PublishList::MissedNotes => "missed-notes.txt",
            PublishList::Notes => "to-publish--notes.txt",
            PublishList::Attachments => "to-publish--attachments.txt",
            PublishList::Everything => "to-publish.txt",
            PublishList::AttachmentsToCheck => "attachments-to-check.txt",
        }
    }
}

impl PublishLists {
    pub fn get(&self, list: PublishList) -> &[String] {
        match list {
            PublishList::MissedNotes => &self.missed_notes,
            PublishList::Notes => &self.notes,
            PublishList::Attachments => &self.attachments,
            PublishList::Everything => &self.everything,
            PublishList::AttachmentsToCheck => &self.attachments_to_check,
        }
    }
}
