//! Parsers for Obsidian markdown syntax.

pub mod code_block;
pub mod frontmatter;
pub mod wikilink;

pub use code_block::CodeRanges;
pub use frontmatter::{parse_frontmatter, scalar_field, split_frontmatter, FrontmatterSplit};
pub use wikilink::{parse_outlinks, parse_wikilinks};
