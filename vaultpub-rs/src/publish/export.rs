//! Combine buckets into the five publish lists and write them out.

use crate::config::Config;
use crate::error::Result;
use crate::index::NoteIndex;
use crate::publish::classify::{partition, Buckets};
use crate::publish::extract::extract_paths;
use crate::storage::Storage;
use crate::types::{PublishList, PublishLists};
use rayon::prelude::*;
use serde::Serialize;

/// Acknowledgment shown after a fully successful export.
pub const SUCCESS_MESSAGE: &str = "Exported files!";

/// Build the five lists. Public entries come before unlisted ones in every
/// combined list; `everything` is the combined notes followed by the
/// combined attachments.
pub fn combine(buckets: &Buckets) -> (PublishLists, usize) {
    let (missed, missed_skipped) = extract_paths(&buckets.missing);
    let (public, public_skipped) = extract_paths(&buckets.public);
    let (unlisted, unlisted_skipped) = extract_paths(&buckets.unlisted);

    let notes = [public.note_paths, unlisted.note_paths].concat();
    let attachments = [public.attachment_paths, unlisted.attachment_paths].concat();
    let attachments_to_check = [public.paths_to_check, unlisted.paths_to_check].concat();
    let everything = [notes.as_slice(), attachments.as_slice()].concat();

    let lists = PublishLists {
        missed_notes: missed.note_paths,
        notes,
        attachments,
        everything,
        attachments_to_check,
    };
    let skipped = missed_skipped.len() + public_skipped.len() + unlisted_skipped.len();

    (lists, skipped)
}

/// Serialize lines for a list file: joined by `\n`, no trailing newline.
pub fn render_list(lines: &[String]) -> String {
    lines.join("\n")
}

/// Overwrite `destination` with `lines`.
pub fn write_list<S: Storage + ?Sized>(storage: &S, destination: &str, lines: &[String]) -> Result<()> {
    storage.write(destination, &render_list(lines))
}

/// Outcome of writing one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenList {
    pub list: PublishList,
    pub destination: String,
    pub lines: usize,
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-bucket note counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub public: usize,
    pub private: usize,
    pub unlisted: usize,
    pub missing: usize,
}

impl From<&Buckets> for BucketCounts {
    fn from(buckets: &Buckets) -> Self {
        Self {
            public: buckets.public.len(),
            private: buckets.private.len(),
            unlisted: buckets.unlisted.len(),
            missing: buckets.missing.len(),
        }
    }
}

/// Summary of an export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub dry_run: bool,
    pub notes: usize,
    pub buckets: BucketCounts,
    pub skipped_records: usize,
    pub missed_notes: Vec<String>,
    pub attachments_to_check: Vec<String>,
    pub files: Vec<WrittenList>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ExportReport {
    /// Destinations that failed to write.
    pub fn failed(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|f| f.error.is_some())
            .map(|f| f.destination.as_str())
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.files.iter().all(|f| f.error.is_none())
    }
}

/// Query `index`, classify, and write the five lists through `storage`.
///
/// The writes run concurrently and independently: one failing does not stop
/// the others. The report records each outcome, and the user gets a single
/// acknowledgment naming any failed destination. With `dry_run` nothing is
/// written and nobody is notified.
pub fn export<I, S>(index: &I, storage: &S, config: &Config, dry_run: bool) -> Result<ExportReport>
where
    I: NoteIndex + ?Sized,
    S: Storage + ?Sized,
{
    let query = index.query(&config.sources)?;
    let mut warnings = query.warnings;

    let buckets = partition(&query.notes);
    let (lists, skipped_records) = combine(&buckets);
    if skipped_records > 0 {
        warnings.push(format!("Skipped {} note record(s) without a path", skipped_records));
    }

    let files: Vec<WrittenList> = PublishList::ALL
        .as_slice()
        .par_iter()
        .map(|&list| {
            let destination = config.destination(list.file_name());
            let lines = lists.get(list);
            let error = if dry_run {
                None
            } else {
                write_list(storage, &destination, lines).err().map(|e| e.to_string())
            };
            WrittenList {
                list,
                lines: lines.len(),
                written: !dry_run && error.is_none(),
                error,
                destination,
            }
        })
        .collect();

    if !dry_run {
        for file in files.iter().filter(|f| f.written) {
            if let Err(e) = storage.after_write(&file.destination) {
                warnings.push(e.to_string());
            }
        }
    }

    let report = ExportReport {
        dry_run,
        notes: query.notes.len(),
        buckets: BucketCounts::from(&buckets),
        skipped_records,
        missed_notes: lists.missed_notes.clone(),
        attachments_to_check: lists.attachments_to_check.clone(),
        files,
        warnings,
    };

    if !dry_run {
        if report.is_success() {
            storage.notify_user(SUCCESS_MESSAGE);
        } else {
            storage.notify_user(&format!("Export failed to write: {}", report.failed().join(", ")));
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PublishError;
    use crate::index::MemoryIndex;
    use crate::storage::MemoryStorage;
    use crate::types::NoteRecord;
    use pretty_assertions::assert_eq;

    fn scenario() -> Vec<NoteRecord> {
        vec![
            NoteRecord::new("knowledge/a.md")
                .with_visibility("public")
                .with_outlink("img/x.png")
                .with_outlink("img/y.pdf"),
            NoteRecord::new("knowledge/b.md").with_visibility("private"),
            NoteRecord::new("knowledge/c.md"),
        ]
    }

    fn mixed() -> Vec<NoteRecord> {
        vec![
            NoteRecord::new("recipes/u1.md")
                .with_visibility("unlisted")
                .with_outlink("u.docx"),
            NoteRecord::new("knowledge/p1.md")
                .with_visibility("public")
                .with_outlink("p.gif")
                .with_outlink("p.zip"),
            NoteRecord::new("week-notes/u2.md")
                .with_visibility("unlisted")
                .with_outlink("knowledge/p1.md"),
            NoteRecord::new("knowledge/p2.md").with_visibility("public"),
        ]
    }

    #[test]
    fn test_combine_scenario() {
        let (lists, skipped) = combine(&partition(&scenario()));
        assert_eq!(lists.notes, vec!["knowledge/a.md"]);
        assert_eq!(lists.attachments, vec!["img/x.png", "img/y.pdf"]);
        assert_eq!(lists.attachments_to_check, vec!["img/y.pdf"]);
        assert_eq!(lists.missed_notes, vec!["knowledge/c.md"]);
        assert_eq!(lists.everything, vec!["knowledge/a.md", "img/x.png", "img/y.pdf"]);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_combine_public_before_unlisted() {
        let buckets = partition(&mixed());
        let (lists, _) = combine(&buckets);

        assert_eq!(
            lists.notes,
            vec!["knowledge/p1.md", "knowledge/p2.md", "recipes/u1.md", "week-notes/u2.md"]
        );
        assert_eq!(lists.attachments, vec!["p.gif", "p.zip", "u.docx"]);
        assert_eq!(lists.attachments_to_check, vec!["p.zip", "u.docx"]);
        assert_eq!(lists.everything.len(), lists.notes.len() + lists.attachments.len());
        assert!(lists.missed_notes.is_empty());
    }

    #[test]
    fn test_render_list_has_no_trailing_newline() {
        let lines = vec!["a.md".to_string(), "b c.png".to_string()];
        assert_eq!(render_list(&lines), "a.md\nb c.png");
        assert_eq!(render_list(&[]), "");
    }

    #[test]
    fn test_write_list_round_trip() {
        let storage = MemoryStorage::new();
        let lines: Vec<String> = (0..5).map(|i| format!("knowledge/{}.md", i)).collect();
        write_list(&storage, "out.txt", &lines).unwrap();

        let content = storage.read("out.txt").unwrap();
        let read_back: Vec<String> = content.split('\n').map(String::from).collect();
        assert_eq!(read_back, lines);
        assert!(!content.ends_with('\n'));
    }

    #[test]
    fn test_export_writes_five_lists() {
        let index = MemoryIndex::new(scenario());
        let storage = MemoryStorage::new();
        let report = export(&index, &storage, &Config::default(), false).unwrap();

        assert!(report.is_success());
        assert_eq!(report.notes, 3);
        assert_eq!(report.buckets.public, 1);
        assert_eq!(report.buckets.private, 1);
        assert_eq!(report.buckets.missing, 1);
        assert_eq!(
            storage.destinations(),
            vec![
                "utils/publish/attachments-to-check.txt",
                "utils/publish/missed-notes.txt",
                "utils/publish/to-publish--attachments.txt",
                "utils/publish/to-publish--notes.txt",
                "utils/publish/to-publish.txt",
            ]
        );
        assert_eq!(
            storage.read("utils/publish/to-publish.txt").unwrap(),
            "knowledge/a.md\nimg/x.png\nimg/y.pdf"
        );
        assert_eq!(storage.read("utils/publish/missed-notes.txt").unwrap(), "knowledge/c.md");
        assert_eq!(storage.notifications(), vec![SUCCESS_MESSAGE]);
        assert_eq!(storage.after_writes().len(), 5);
    }

    #[test]
    fn test_export_failed_write_is_isolated() {
        let index = MemoryIndex::new(scenario());
        let storage = MemoryStorage::new().fail_on("utils/publish/to-publish.txt");
        let report = export(&index, &storage, &Config::default(), false).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.failed(), vec!["utils/publish/to-publish.txt"]);
        assert_eq!(storage.destinations().len(), 4);
        assert_eq!(
            storage.read("utils/publish/to-publish--notes.txt").as_deref(),
            Some("knowledge/a.md")
        );

        let notifications = storage.notifications();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].contains("utils/publish/to-publish.txt"));
        assert!(!storage.after_writes().contains(&"utils/publish/to-publish.txt".to_string()));
    }

    #[test]
    fn test_export_dry_run_writes_nothing() {
        let index = MemoryIndex::new(scenario());
        let storage = MemoryStorage::new();
        let report = export(&index, &storage, &Config::default(), true).unwrap();

        assert!(report.dry_run);
        assert!(storage.destinations().is_empty());
        assert!(storage.notifications().is_empty());
        assert!(report.files.iter().all(|f| !f.written));
        assert_eq!(report.attachments_to_check, vec!["img/y.pdf"]);
    }

    #[test]
    fn test_export_query_unavailable() {
        let storage = MemoryStorage::new();
        let result = export(&MemoryIndex::unavailable(), &storage, &Config::default(), false);
        assert!(matches!(result, Err(PublishError::QueryUnavailable(_))));
        assert!(storage.destinations().is_empty());
    }

    #[test]
    fn test_export_skips_malformed_records() {
        let mut notes = scenario();
        notes.push(NoteRecord::default().with_visibility("public").with_outlink("lost.pdf"));
        let storage = MemoryStorage::new();
        let report = export(&MemoryIndex::new(notes), &storage, &Config::default(), false).unwrap();

        assert_eq!(report.skipped_records, 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            storage.read("utils/publish/to-publish--attachments.txt").unwrap(),
            "img/x.png\nimg/y.pdf"
        );
    }

    #[test]
    fn test_export_custom_output_dir() {
        let config = Config {
            output_dir: "publish/".to_string(),
            ..Config::default()
        };
        let storage = MemoryStorage::new();
        export(&MemoryIndex::new(scenario()), &storage, &config, false).unwrap();
        assert!(storage.read("publish/to-publish.txt").is_some());
    }
}
