//! Visibility classification and publish-list export.

pub mod classify;
pub mod export;
pub mod extract;

pub use classify::{classify, classify_str, partition, Buckets};
pub use export::{combine, export, render_list, write_list, ExportReport, WrittenList};
pub use extract::{extract_paths, is_attachment, needs_check, COMMON_IMAGE_EXTENSIONS};
