//! Report command: show buckets without writing.

use crate::cli::args::ReportArgs;
use crate::cli::output::Output;
use crate::config::Config;
use crate::error::Result;
use crate::index::NoteIndex;
use crate::publish::{partition, Buckets};
use crate::types::{NoteRecord, Visibility};
use crate::vault::Vault;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub sources: Vec<String>,
    pub total: usize,
    pub counts: BTreeMap<String, usize>,
    pub buckets: BTreeMap<String, Vec<String>>,
}

fn paths(notes: &[NoteRecord]) -> Vec<String> {
    notes.iter().filter_map(|n| n.path.clone()).collect()
}

pub fn build_report(sources: Vec<String>, buckets: &Buckets, only: Option<Visibility>) -> ReportResponse {
    let mut counts = BTreeMap::new();
    let mut listed = BTreeMap::new();

    for visibility in Visibility::ALL {
        let notes = buckets.get(visibility);
        counts.insert(visibility.to_string(), notes.len());
        if only.is_none_or(|v| v == visibility) {
            listed.insert(visibility.to_string(), paths(notes));
        }
    }

    ReportResponse {
        sources,
        total: buckets.total(),
        counts,
        buckets: listed,
    }
}

pub fn run(vault: &Vault, config: &Config, args: &ReportArgs, output: &Output) -> Result<()> {
    let sources = if args.sources.is_empty() {
        config.sources.clone()
    } else {
        args.sources.clone()
    };

    let query = vault.query(&sources)?;
    for warning in &query.warnings {
        output.warn(warning);
    }

    let buckets = partition(&query.notes);
    let response = build_report(sources, &buckets, args.bucket.map(Visibility::from));
    output.print(&response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_report_single_bucket() {
        let notes = vec![
            NoteRecord::new("k/a.md").with_visibility("public"),
            NoteRecord::new("k/b.md"),
        ];
        let report = build_report(vec!["k".to_string()], &partition(&notes), Some(Visibility::Missing));
        assert_eq!(report.total, 2);
        assert_eq!(report.counts["public"], 1);
        assert_eq!(report.buckets.len(), 1);
        assert_eq!(report.buckets["missing"], vec!["k/b.md"]);
    }
}
