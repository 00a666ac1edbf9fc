//! Readable Markdown document with one section per file.

use std::fmt::Write;

use crate::error::Result;
use crate::plugins::Plugin;
use crate::types::{CodebaseSnapshot, FileRecord};
use crate::utils::format_file_size;

/// Markdown rendering of the snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownPlugin;

/// A backtick fence longer than any backtick run in `content`
fn fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in content.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat(longest.max(2) + 1)
}

fn write_file(out: &mut String, snapshot: &CodebaseSnapshot, record: &FileRecord) -> Result<()> {
    writeln!(out, "## {}", snapshot.display_path(record))?;
    writeln!(out)?;
    writeln!(out, "- **Size:** {}", format_file_size(record.size))?;
    if !record.extension.is_empty() {
        writeln!(out, "- **Extension:** `{}`", record.extension)?;
    }
    writeln!(
        out,
        "- **Type:** {}",
        if record.is_binary { "binary" } else { "text" }
    )?;
    if let Some(modified) = record.modified {
        writeln!(out, "- **Modified:** {}", modified.to_rfc3339())?;
    }
    writeln!(out)?;

    match (&record.content, record.is_binary) {
        (_, true) => writeln!(out, "_Binary file, content omitted._")?,
        (Some(content), false) => {
            let fence = fence_for(content);
            writeln!(out, "{}{}", fence, record.extension)?;
            out.push_str(content);
            if !content.ends_with('\n') {
                out.push('\n');
            }
            writeln!(out, "{fence}")?;
        }
        (None, false) => writeln!(out, "_Content not loaded._")?,
    }
    writeln!(out)?;
    Ok(())
}

impl Plugin for MarkdownPlugin {
    fn name(&self) -> &str {
        "markdown"
    }

    fn render(&self, snapshot: &CodebaseSnapshot) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "# Codebase Snapshot")?;
        writeln!(out)?;

        writeln!(out, "| Metric | Value |")?;
        writeln!(out, "| --- | --- |")?;
        for root in &snapshot.roots {
            writeln!(out, "| Root | `{}` |", root.display())?;
        }
        writeln!(out, "| Files | {} |", snapshot.files.len())?;
        writeln!(out, "| Binary files | {} |", snapshot.binary_count())?;
        writeln!(
            out,
            "| Total size | {} |",
            format_file_size(snapshot.total_size())
        )?;
        writeln!(out)?;

        if !snapshot.files.is_empty() {
            writeln!(out, "## Contents")?;
            writeln!(out)?;
            for record in &snapshot.files {
                writeln!(out, "- `{}`", snapshot.display_path(record))?;
            }
            writeln!(out)?;
        }

        for record in &snapshot.files {
            write_file(&mut out, snapshot, record)?;
        }

        if !snapshot.skipped.is_empty() {
            writeln!(out, "## Skipped")?;
            writeln!(out)?;
            for entry in &snapshot.skipped {
                writeln!(out, "- `{}`: {}", entry.path.display(), entry.reason)?;
            }
        }

        Ok(out)
    }
}
