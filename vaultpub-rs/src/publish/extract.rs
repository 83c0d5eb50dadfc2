//! Note and attachment path extraction.

use crate::types::{ExportPaths, NoteRecord};

/// Extension of markdown notes. Compared case-sensitively.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Image extensions that need no manual review. The list is case-sensitive
/// and intentionally includes `JPG` but no other uppercase variant.
pub const COMMON_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "JPG", "png", "gif"];

/// Whether an outlink with this extension is an attachment.
pub fn is_attachment(extension: Option<&str>) -> bool {
    extension.is_some_and(|ext| ext != MARKDOWN_EXTENSION)
}

/// Whether an attachment with this extension must be reviewed by hand.
pub fn needs_check(extension: &str) -> bool {
    !COMMON_IMAGE_EXTENSIONS.contains(&extension)
}

/// Collect note paths, attachment paths and attachments to check.
///
/// Order follows the notes, then each note's links. Nothing is deduplicated.
/// Records without a path are skipped along with their links; their indices
/// are returned so callers can report them.
pub fn extract_paths(notes: &[NoteRecord]) -> (ExportPaths, Vec<usize>) {
    let mut paths = ExportPaths::default();
    let mut skipped = Vec::new();

    for (i, note) in notes.iter().enumerate() {
        let Some(ref note_path) = note.path else {
            skipped.push(i);
            continue;
        };
        paths.note_paths.push(note_path.clone());

        for link in &note.outlinks {
            let extension = link.extension();
            if !is_attachment(extension) {
                continue;
            }
            paths.attachment_paths.push(link.path.clone());
            if extension.is_some_and(needs_check) {
                paths.paths_to_check.push(link.path.clone());
            }
        }
    }

    (paths, skipped)
}
