//! Links command: a note's outgoing links as the exporter sees them.

use crate::cli::args::LinksArgs;
use crate::cli::output::Output;
use crate::error::Result;
use crate::publish::{is_attachment, needs_check};
use crate::resolution::LinkResolver;
use crate::types::{LinkSyntax, OutLink, Visibility};
use crate::vault::Vault;
use crate::Note;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LinkEntry {
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub path: String,
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    pub attachment: bool,
    pub to_check: bool,
    pub embed: bool,
    pub syntax: LinkSyntax,
    pub line: usize,
}

#[derive(Debug, Serialize)]
pub struct LinksResponse {
    pub note: String,
    pub visibility: Visibility,
    pub links: Vec<LinkEntry>,
    pub total: usize,
}

pub fn run(vault: &Vault, args: &LinksArgs, output: &Output) -> Result<()> {
    let path = vault.resolve_note(&args.note)?;
    let note = vault.load_note(&path)?;

    let frontmatter = match note.frontmatter() {
        Ok(fm) => fm,
        Err(e) => {
            output.warn(&e.to_string());
            None
        }
    };
    let visibility = Visibility::from_tag(Note::visibility(frontmatter.as_ref()).as_deref());

    let listing = vault.list_files()?;
    for warning in &listing.warnings {
        output.warn(warning);
    }
    let resolver = LinkResolver::new(listing.files);
    let folder = note.folder_str();

    let links: Vec<LinkEntry> = note
        .links(frontmatter.as_ref())
        .into_iter()
        .map(|link| {
            let resolved = resolver.resolve(&link.target, &folder);
            let out = OutLink::new(resolved.clone().unwrap_or_else(|| link.target.clone()));
            let extension = out.extension().map(String::from);
            let attachment = is_attachment(extension.as_deref());
            LinkEntry {
                to_check: attachment && extension.as_deref().is_some_and(needs_check),
                attachment,
                extension,
                resolved: resolved.is_some(),
                path: out.path,
                target: link.target,
                heading: link.heading,
                block_id: link.block_id,
                alias: link.alias,
                embed: link.embed,
                syntax: link.syntax,
                line: link.line,
            }
        })
        .filter(|entry| !args.attachments_only || entry.attachment)
        .collect();

    let response = LinksResponse {
        note: note.path_str(),
        visibility,
        total: links.len(),
        links,
    };
    output.print(&response)
}
