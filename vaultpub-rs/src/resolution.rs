//! Link target resolution.
//!
//! A link target resolves in this order:
//! 1. Exact vault path (case-sensitive, then case-insensitive)
//! 2. Path relative to the linking note's folder
//! 3. Path suffix match anywhere in the vault (case-insensitive); the
//!    shortest matching path wins, ties broken lexically
//!
//! Each step tries the target as written, then with `.md` appended.

use std::collections::{HashMap, HashSet};

/// Resolves link targets against a fixed set of vault files.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
    /// All vault-relative file paths, `/`-separated, shortest first.
    files: Vec<String>,
    /// `files` lowercased, index for index.
    lowered: Vec<String>,
    /// Exact paths, for case-sensitive lookup.
    known: HashSet<String>,
    /// Lowercased path -> original path.
    by_lower: HashMap<String, String>,
}

impl LinkResolver {
    pub fn new(files: impl IntoIterator<Item = String>) -> Self {
        let mut files: Vec<String> = files.into_iter().collect();
        files.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        let lowered: Vec<String> = files.iter().map(|f| f.to_lowercase()).collect();
        let known = files.iter().cloned().collect();

        let mut by_lower = HashMap::with_capacity(files.len());
        for (file, lower) in files.iter().zip(&lowered) {
            by_lower.entry(lower.clone()).or_insert_with(|| file.clone());
        }

        Self {
            files,
            lowered,
            known,
            by_lower,
        }
    }

    /// Resolve `target` linked from a note in `from_folder`. Returns `None`
    /// for a broken link.
    pub fn resolve(&self, target: &str, from_folder: &str) -> Option<String> {
        let target = target.trim().trim_start_matches('/');
        if target.is_empty() {
            return None;
        }

        let candidates = [target.to_string(), format!("{}.md", target)];

        for candidate in &candidates {
            if let Some(path) = self.exact(candidate) {
                return Some(path);
            }
        }

        if !from_folder.is_empty() || target.starts_with("./") || target.starts_with("../") {
            for candidate in &candidates {
                if let Some(joined) = join_relative(from_folder, candidate) {
                    if let Some(path) = self.exact(&joined) {
                        return Some(path);
                    }
                }
            }
        }

        candidates.iter().find_map(|candidate| self.by_suffix(candidate))
    }

    fn exact(&self, candidate: &str) -> Option<String> {
        if self.known.contains(candidate) {
            return Some(candidate.to_string());
        }
        self.by_lower.get(&candidate.to_lowercase()).cloned()
    }

    fn by_suffix(&self, candidate: &str) -> Option<String> {
        let suffix = format!("/{}", candidate.to_lowercase());
        // `files` is sorted shortest first, so the first hit wins.
        self.lowered
            .iter()
            .position(|lower| lower.ends_with(&suffix))
            .map(|i| self.files[i].clone())
    }
}

/// Join `target` onto `folder`, normalizing `.` and `..`. Returns `None` if
/// the path escapes the vault root.
fn join_relative(folder: &str, target: &str) -> Option<String> {
    let mut parts: Vec<&str> = folder.split('/').filter(|p| !p.is_empty()).collect();

    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            _ => parts.push(part),
        }
    }

    Some(parts.join("/"))
}
