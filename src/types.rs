/*!
 * Core types and data structures for singlefile
 */

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::replace_invalid_chars;

/// One accepted file, as produced by the analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Canonical absolute path
    pub path: PathBuf,
    /// Path relative to the root it was found under, joined onto that root as given
    pub relative_path: PathBuf,
    /// Lower-cased extension without the dot, empty if none
    pub extension: String,
    /// Size in bytes
    pub size: u64,
    /// Binary classification
    pub is_binary: bool,
    /// Last modification time
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
    /// Unix permission bits in octal
    #[serde(default)]
    pub permissions: String,
    /// Decoded text, only for text files when content was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileRecord {
    /// Number of lines in the loaded content
    pub fn line_count(&self) -> usize {
        self.content.as_deref().map_or(0, |c| c.lines().count())
    }
}

/// An entry dropped under continue-on-error, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Ordered result of one traversal over the configured roots
#[derive(Debug, Clone, Default)]
pub struct CodebaseSnapshot {
    /// Root paths as configured
    pub roots: Vec<PathBuf>,
    /// Accepted files in traversal order
    pub files: Vec<FileRecord>,
    /// Entries skipped because of errors
    pub skipped: Vec<SkippedEntry>,
    /// Whether outputs should show absolute paths
    pub absolute_paths: bool,
}

impl CodebaseSnapshot {
    /// Create an empty snapshot for the given roots
    pub fn new(roots: Vec<PathBuf>, absolute_paths: bool) -> Self {
        Self {
            roots,
            files: Vec::new(),
            skipped: Vec::new(),
            absolute_paths,
        }
    }

    /// The path of a record as it should appear in outputs
    pub fn display_path(&self, record: &FileRecord) -> String {
        let path: &Path = if self.absolute_paths {
            &record.path
        } else {
            &record.relative_path
        };
        path.to_string_lossy().to_string()
    }

    /// Sum of all file sizes
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Number of files classified as binary
    pub fn binary_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_binary).count()
    }

    /// Total lines across loaded text content
    pub fn total_lines(&self) -> usize {
        self.files.iter().map(FileRecord::line_count).sum()
    }

    /// Copy with invalid characters replaced in every rendered string
    pub fn with_replaced_chars(&self) -> Self {
        let replace_path = |path: &Path| PathBuf::from(replace_invalid_chars(&path.to_string_lossy()));

        Self {
            roots: self.roots.iter().map(|r| replace_path(r)).collect(),
            files: self
                .files
                .iter()
                .map(|f| FileRecord {
                    path: replace_path(&f.path),
                    relative_path: replace_path(&f.relative_path),
                    extension: replace_invalid_chars(&f.extension),
                    content: f.content.as_deref().map(replace_invalid_chars),
                    ..f.clone()
                })
                .collect(),
            skipped: self
                .skipped
                .iter()
                .map(|s| SkippedEntry {
                    path: replace_path(&s.path),
                    reason: replace_invalid_chars(&s.reason),
                })
                .collect(),
            absolute_paths: self.absolute_paths,
        }
    }
}
