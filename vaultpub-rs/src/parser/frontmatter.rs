//! YAML frontmatter parsing.

use crate::error::{PublishError, Result};
use serde_yaml::Value;
use std::path::Path;

/// A note split into its frontmatter block and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// The content after the frontmatter.
    pub body: &'a str,
    /// Byte offset of `body` within the original content.
    pub body_offset: usize,
}

/// Split content into frontmatter and body.
///
/// Frontmatter must open with `---` on the very first line and close with a
/// line that is exactly `---`. Without a closing delimiter the whole content
/// is body.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let no_frontmatter = FrontmatterSplit {
        yaml: None,
        body: content,
        body_offset: 0,
    };

    let Some(rest) = content.strip_prefix("---") else {
        return no_frontmatter;
    };
    let yaml_start = if rest.starts_with("\r\n") {
        5
    } else if rest.starts_with('\n') {
        4
    } else {
        return no_frontmatter;
    };

    let mut offset = yaml_start;
    for line in content[yaml_start..].split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            // The YAML excludes the newline before the closing delimiter.
            let yaml_end = offset.saturating_sub(1).max(yaml_start);
            let yaml = content[yaml_start..yaml_end].trim_end_matches('\r');
            let body_offset = offset + line.len();
            return FrontmatterSplit {
                yaml: Some(yaml),
                body: &content[body_offset..],
                body_offset,
            };
        }
        offset += line.len();
    }

    no_frontmatter
}

/// Parse frontmatter into a YAML value, with the note path for error context.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<Option<Value>> {
    let Some(yaml) = split_frontmatter(content).yaml else {
        return Ok(None);
    };

    if yaml.trim().is_empty() {
        return Ok(None);
    }

    serde_yaml::from_str(yaml)
        .map(Some)
        .map_err(|e| PublishError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Read a scalar frontmatter field as a string.
///
/// Strings are returned verbatim; numbers and booleans are stringified.
/// Null, sequences and mappings count as absent.
pub fn scalar_field(frontmatter: &Value, key: &str) -> Option<String> {
    match frontmatter.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Collect every string value in the frontmatter, depth first, in document
/// order. Link parsing runs over these.
pub fn string_values(frontmatter: &Value) -> Vec<&str> {
    let mut out = Vec::new();
    collect_strings(frontmatter, &mut out);
    out
}

fn collect_strings<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Sequence(seq) => seq.iter().for_each(|v| collect_strings(v, out)),
        Value::Mapping(map) => map.values().for_each(|v| collect_strings(v, out)),
        Value::Tagged(tagged) => collect_strings(&tagged.value, out),
        _ => {}
    }
}
