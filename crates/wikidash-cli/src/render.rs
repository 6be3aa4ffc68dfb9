//! `render` command: wiki markup from a file or stdin to display blocks.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use wikidash_wiki::{render_summary, DisplayBlock};

/// Reads markup from `path` (or stdin) and prints the rendered blocks.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub(crate) fn run_render(path: Option<&Path>) -> anyhow::Result<()> {
    let raw = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    print!("{}", format_blocks(&render_summary(&raw)));
    Ok(())
}

/// One block per paragraph, separated by blank lines; headings are
/// prefixed with `## `.
pub(crate) fn format_blocks(blocks: &[DisplayBlock]) -> String {
    blocks
        .iter()
        .map(|block| match block {
            DisplayBlock::Heading(text) => format!("## {text}\n"),
            DisplayBlock::Paragraph(html) => format!("{html}\n"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
