//! Flattened text dump: every file path followed by its content.

use std::fmt::Write;

use crate::error::Result;
use crate::plugins::Plugin;
use crate::types::CodebaseSnapshot;
use crate::utils::format_file_size;

const RULE: &str =
    "================================================================================";

/// Plain-text concatenation of the snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPlugin;

impl Plugin for DefaultPlugin {
    fn name(&self) -> &str {
        "default"
    }

    fn render(&self, snapshot: &CodebaseSnapshot) -> Result<String> {
        let mut out = String::new();
        let roots: Vec<String> = snapshot
            .roots
            .iter()
            .map(|r| r.display().to_string())
            .collect();

        writeln!(out, "Codebase snapshot of {}", roots.join(", "))?;
        writeln!(
            out,
            "{} files, {}",
            snapshot.files.len(),
            format_file_size(snapshot.total_size())
        )?;

        for record in &snapshot.files {
            let extension = if record.extension.is_empty() {
                "(none)"
            } else {
                record.extension.as_str()
            };

            writeln!(out)?;
            writeln!(out, "{RULE}")?;
            writeln!(out, "File: {}", snapshot.display_path(record))?;
            writeln!(
                out,
                "Size: {} | Extension: {} | Binary: {}",
                format_file_size(record.size),
                extension,
                if record.is_binary { "yes" } else { "no" }
            )?;
            writeln!(out, "{RULE}")?;

            match (&record.content, record.is_binary) {
                (_, true) => writeln!(out, "[binary file, content omitted]")?,
                (Some(content), false) => {
                    out.push_str(content);
                    if !content.ends_with('\n') {
                        out.push('\n');
                    }
                }
                (None, false) => writeln!(out, "[content not loaded]")?,
            }
        }

        Ok(out)
    }
}
