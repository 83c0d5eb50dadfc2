//! Link and embed parsing: `[[wikilinks]]`, `![[embeds]]` and markdown
//! `[text](target)` links.

use crate::parser::code_block::CodeRanges;
use crate::parser::frontmatter::{split_frontmatter, string_values};
use crate::types::{Link, LinkSyntax};
use regex::Regex;
use serde_yaml::Value;
use std::sync::LazyLock;

// (!)?                     - Optional ! for embeds (group 1)
// \[\[                     - Opening [[
// ([^\]\|#]+)              - Target path (group 2)
// (?:#\^([a-zA-Z0-9_-]+))? - Block reference (group 3)
// (?:#([^\]\|]+))?         - Heading reference (group 4)
// (?:\|([^\]]+))?          - Alias (group 5)
// \]\]                     - Closing ]]
static WIKILINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[\[([^\]\|#]+)(?:#\^([a-zA-Z0-9_-]+))?(?:#([^\]\|]+))?(?:\|([^\]]+))?\]\]")
        .unwrap()
});

// (!)?                 - Optional ! for images (group 1)
// \[([^\]]*)\]         - Link text (group 2)
// \(                   - Opening (
// <([^>]+)>|([^)\s]+)  - Angle-bracketed (group 3) or bare (group 4) target
// (?:\s+"[^"]*")?      - Optional title
// \)                   - Closing )
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(!?)\[([^\]\[]*)\]\((?:<([^>]+)>|([^)\s]+))(?:\s+"[^"]*")?\)"#).unwrap()
});

// Anything with a URI scheme (http:, https:, mailto:, obsidian:, ...).
static URI_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:").unwrap());

/// Parse wikilinks and embeds from content, in document order. Links inside
/// code are skipped.
pub fn parse_wikilinks(content: &str) -> Vec<Link> {
    let code = CodeRanges::scan(content);
    positioned_wikilinks(content, &code)
        .into_iter()
        .map(|(_, link)| link)
        .collect()
}

/// Parse every outgoing link of a note: frontmatter wikilinks first, then the
/// body's wikilinks and markdown links interleaved in document order.
pub fn parse_outlinks(content: &str, frontmatter: Option<&Value>) -> Vec<Link> {
    let mut links = Vec::new();

    if let Some(fm) = frontmatter {
        for value in string_values(fm) {
            links.extend(parse_wikilinks(value).into_iter().map(|mut link| {
                link.syntax = LinkSyntax::Frontmatter;
                link.line = 0;
                link
            }));
        }
    }

    let split = split_frontmatter(content);
    let code = CodeRanges::scan(content);

    let mut body: Vec<(usize, Link)> = positioned_wikilinks(content, &code)
        .into_iter()
        .chain(positioned_markdown_links(content, &code))
        .filter(|(offset, _)| *offset >= split.body_offset)
        .collect();
    body.sort_by_key(|(offset, _)| *offset);

    links.extend(body.into_iter().map(|(_, link)| link));
    links
}

fn positioned_wikilinks(content: &str, code: &CodeRanges) -> Vec<(usize, Link)> {
    let mut links = Vec::new();

    for cap in WIKILINK.captures_iter(content) {
        let Some(full) = cap.get(0) else { continue };
        if code.contains(full.start()) {
            continue;
        }

        // Inside table cells the alias pipe is escaped as `\|`.
        let target = cap.get(2).map(|m| unescape_pipe(m.as_str())).unwrap_or("");
        if target.is_empty() {
            continue;
        }

        let mut block_id = cap.get(3).map(|m| m.as_str().to_string());
        let mut heading = cap.get(4).map(|m| unescape_pipe(m.as_str()).to_string());
        if let Some(block) = heading.as_deref().and_then(|h| h.strip_prefix('^')) {
            block_id = Some(block.to_string());
            heading = None;
        }

        links.push((
            full.start(),
            Link {
                target: target.to_string(),
                alias: cap.get(5).map(|m| m.as_str().to_string()),
                heading,
                block_id,
                embed: cap.get(1).is_some_and(|m| !m.as_str().is_empty()),
                syntax: LinkSyntax::Wiki,
                line: line_of(content, full.start()),
            },
        ));
    }

    links
}

fn positioned_markdown_links(content: &str, code: &CodeRanges) -> Vec<(usize, Link)> {
    let mut links = Vec::new();

    for cap in MARKDOWN_LINK.captures_iter(content) {
        let Some(full) = cap.get(0) else { continue };
        if code.contains(full.start()) {
            continue;
        }

        let Some(raw) = cap.get(3).or_else(|| cap.get(4)).map(|m| m.as_str().trim()) else {
            continue;
        };
        if raw.starts_with('#') || URI_SCHEME.is_match(raw) {
            continue;
        }

        let decoded = urlencoding::decode(raw)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| raw.to_string());
        let (target, heading, block_id) = split_subpath(&decoded);
        if target.is_empty() {
            continue;
        }

        let text = cap.get(2).map(|m| m.as_str()).unwrap_or("");

        links.push((
            full.start(),
            Link {
                target,
                alias: (!text.is_empty()).then(|| text.to_string()),
                heading,
                block_id,
                embed: cap.get(1).is_some_and(|m| !m.as_str().is_empty()),
                syntax: LinkSyntax::Markdown,
                line: line_of(content, full.start()),
            },
        ));
    }

    links
}

/// Split `target#heading` / `target#^block` into parts.
fn split_subpath(raw: &str) -> (String, Option<String>, Option<String>) {
    match raw.split_once('#') {
        Some((target, sub)) => {
            let target = target.trim().to_string();
            match sub.strip_prefix('^') {
                Some(block) => (target, None, Some(block.to_string())),
                None => (target, Some(sub.to_string()), None),
            }
        }
        None => (raw.trim().to_string(), None, None),
    }
}

fn unescape_pipe(part: &str) -> &str {
    part.trim().trim_end_matches('\\').trim_end()
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn markdown_links(content: &str) -> Vec<Link> {
        let code = CodeRanges::scan(content);
        positioned_markdown_links(content, &code)
            .into_iter()
            .map(|(_, link)| link)
            .collect()
    }

    fn targets(links: &[Link]) -> Vec<&str> {
        links.iter().map(|l| l.target.as_str()).collect()
    }

    #[test]
    fn test_simple_wikilink() {
        let links = parse_wikilinks("See [[My Note]] for details.");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "My Note");
        assert!(links[0].alias.is_none());
        assert!(!links[0].embed);
        assert_eq!(links[0].syntax, LinkSyntax::Wiki);
    }

    #[test]
    fn test_wikilink_parts() {
        let links = parse_wikilinks("[[Note#Section|alias]] and [[Other#^abc123]]");
        assert_eq!(links[0].target, "Note");
        assert_eq!(links[0].heading.as_deref(), Some("Section"));
        assert_eq!(links[0].alias.as_deref(), Some("alias"));
        assert_eq!(links[1].target, "Other");
        assert_eq!(links[1].block_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_embed() {
        let links = parse_wikilinks("![[image.png|400]]");
        assert_eq!(links.len(), 1);
        assert!(links[0].embed);
        assert_eq!(links[0].target, "image.png");
    }

    #[test]
    fn test_wikilink_escaped_pipe_in_table() {
        let content = "| image | note |\n|---|---|\n| ![[photo.png\\|200]] | [[Recipes/Bread#Dough\\|bread]] |";
        let links = parse_outlinks(content, None);
        assert_eq!(targets(&links), vec!["photo.png", "Recipes/Bread"]);
        assert_eq!(links[0].alias.as_deref(), Some("200"));
        assert_eq!(links[1].heading.as_deref(), Some("Dough"));
        assert_eq!(links[1].alias.as_deref(), Some("bread"));
    }

    #[test]
    fn test_wikilink_escaped_pipe_after_block_ref() {
        let links = parse_wikilinks("| [[Note#^abc123\\|see]] |");
        assert_eq!(links[0].target, "Note");
        assert_eq!(links[0].block_id.as_deref(), Some("abc123"));
        assert!(links[0].heading.is_none());
    }

    #[test]
    fn test_wikilink_in_code_skipped() {
        let content = "See [[real link]]\n\n```\n[[fake link]]\n```\n\nand `[[inline]]` here";
        assert_eq!(targets(&parse_wikilinks(content)), vec!["real link"]);
    }

    #[test]
    fn test_wikilink_line_numbers() {
        let links = parse_wikilinks("Line 1\n[[A]]\nLine 3\n[[B]]");
        assert_eq!(links[0].line, 2);
        assert_eq!(links[1].line, 4);
    }

    #[test]
    fn test_markdown_links() {
        let content = "![alt](img/photo.jpg) and [doc](files/My%20Report.pdf \"title\")";
        let links = markdown_links(content);
        assert_eq!(targets(&links), vec!["img/photo.jpg", "files/My Report.pdf"]);
        assert!(links[0].embed);
        assert!(!links[1].embed);
        assert_eq!(links[1].alias.as_deref(), Some("doc"));
    }

    #[test]
    fn test_markdown_angle_brackets_and_heading() {
        let links = markdown_links("[x](<folder/A note.md#Part>)");
        assert_eq!(links[0].target, "folder/A note.md");
        assert_eq!(links[0].heading.as_deref(), Some("Part"));
    }

    #[test]
    fn test_markdown_external_and_anchor_skipped() {
        let content = "[site](https://example.com/a.png) [mail](mailto:a@b.c) [top](#heading)";
        assert!(markdown_links(content).is_empty());
    }

    #[test]
    fn test_outlinks_document_order() {
        let content = "---\nvisibility: public\n---\n[a](a.pdf) then [[B]] then ![[c.png]]";
        let links = parse_outlinks(content, None);
        assert_eq!(targets(&links), vec!["a.pdf", "B", "c.png"]);
    }

    #[test]
    fn test_outlinks_frontmatter_first() {
        let content = "---\nup: \"[[Parent]]\"\n---\nBody [[Child]]";
        let fm: Value = serde_yaml::from_str("up: \"[[Parent]]\"").unwrap();
        let links = parse_outlinks(content, Some(&fm));
        assert_eq!(targets(&links), vec!["Parent", "Child"]);
        assert_eq!(links[0].syntax, LinkSyntax::Frontmatter);
    }

    #[test]
    fn test_outlinks_keep_duplicates() {
        let links = parse_outlinks("[[x.png]] [[x.png]]", None);
        assert_eq!(targets(&links), vec!["x.png", "x.png"]);
    }
}
