//! vaultpub - classify Obsidian-style vault notes by visibility and emit the
//! lists of files to publish.
//!
//! # Overview
//!
//! Every note under the configured source folders is read, its `visibility`
//! frontmatter field decides its bucket (`public`, `private`, `unlisted`, or
//! missing), and its links are resolved to vault paths. Five plain-text lists
//! are then written under `utils/publish/`:
//!
//! - `to-publish--notes.txt`: public and unlisted notes
//! - `to-publish--attachments.txt`: their non-markdown link targets
//! - `to-publish.txt`: both of the above
//! - `attachments-to-check.txt`: attachments that are not common images
//! - `missed-notes.txt`: notes with no recognized visibility
//!
//! # Example
//!
//! ```no_run
//! use vaultpub::{export, Config, FsStorage, Vault};
//!
//! let vault = Vault::new("/path/to/vault").unwrap();
//! let storage = FsStorage::new(&vault.root);
//! let report = export(&vault, &storage, &Config::default(), false).unwrap();
//! println!("{} notes, {} to check", report.notes, report.attachments_to_check.len());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod note;
pub mod parser;
pub mod publish;
pub mod resolution;
pub mod storage;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use config::Config;
pub use error::{PublishError, Result};
pub use index::{MemoryIndex, NoteIndex, NoteQuery};
pub use note::Note;
pub use publish::{classify, export, extract_paths, partition, ExportReport};
pub use storage::{FsStorage, MemoryStorage, Storage};
pub use types::*;
pub use vault::{FileListing, Vault};
