//! Code span detection, so links inside code are not treated as outlinks.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// `code` or ``code with ` inside``
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"``(?:[^`]|`[^`])*``|`[^`\n]+`").unwrap());

/// Byte ranges covered by fenced code blocks and inline code spans, sorted by
/// start offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeRanges {
    ranges: Vec<Range<usize>>,
}

impl CodeRanges {
    /// Scan `content` for fenced blocks (``` or ~~~) and inline code.
    pub fn scan(content: &str) -> Self {
        let mut ranges = fenced_blocks(content);

        for m in INLINE_CODE.find_iter(content) {
            if ranges.iter().any(|r| r.contains(&m.start())) {
                continue;
            }
            ranges.push(m.range());
        }

        ranges.sort_by_key(|r| r.start);
        Self { ranges }
    }

    /// Whether `offset` falls inside code.
    pub fn contains(&self, offset: usize) -> bool {
        self.ranges.iter().any(|r| r.contains(&offset))
    }
}

/// Find fenced code blocks line by line. An unclosed fence runs to the end
/// of the content.
fn fenced_blocks(content: &str) -> Vec<Range<usize>> {
    let mut blocks = Vec::new();
    // (fence char, fence length, start offset)
    let mut open: Option<(char, usize, usize)> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);

        match open {
            None => {
                if let Some((ch, len)) = fence(trimmed) {
                    open = Some((ch, len, offset));
                }
            }
            Some((ch, len, start)) => {
                let body = trimmed.trim_end();
                if body.len() >= len && body.chars().all(|c| c == ch) {
                    blocks.push(start..offset + trimmed.len());
                    open = None;
                }
            }
        }

        offset += line.len();
    }

    if let Some((_, _, start)) = open {
        blocks.push(start..content.len());
    }

    blocks
}

/// If `line` opens a fence, return its character and length.
fn fence(line: &str) -> Option<(char, usize)> {
    let ch = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = line.chars().take_while(|c| *c == ch).count();
    (len >= 3).then_some((ch, len))
}
