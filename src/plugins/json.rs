//! Structured JSON record of the snapshot.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plugins::Plugin;
use crate::types::{CodebaseSnapshot, FileRecord, SkippedEntry};

/// Top-level JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonDocument {
    pub roots: Vec<String>,
    pub file_count: usize,
    pub total_size: u64,
    pub files: Vec<JsonFile>,
    #[serde(default)]
    pub skipped: Vec<SkippedEntry>,
}

/// One file entry: the record plus its display path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFile {
    pub display_path: String,
    #[serde(flatten)]
    pub record: FileRecord,
}

impl JsonDocument {
    /// Build the document for a snapshot
    pub fn from_snapshot(snapshot: &CodebaseSnapshot) -> Self {
        Self {
            roots: snapshot
                .roots
                .iter()
                .map(|r| r.to_string_lossy().to_string())
                .collect(),
            file_count: snapshot.files.len(),
            total_size: snapshot.total_size(),
            files: snapshot
                .files
                .iter()
                .map(|record| JsonFile {
                    display_path: snapshot.display_path(record),
                    record: record.clone(),
                })
                .collect(),
            skipped: snapshot.skipped.clone(),
        }
    }
}

/// Pretty-printed JSON output
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPlugin;

impl Plugin for JsonPlugin {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, snapshot: &CodebaseSnapshot) -> Result<String> {
        let document = JsonDocument::from_snapshot(snapshot);
        let mut out = serde_json::to_string_pretty(&document)?;
        out.push('\n');
        Ok(out)
    }
}
