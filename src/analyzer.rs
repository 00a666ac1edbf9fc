/*!
 * Per-file analysis: classification, metadata and content loading
 */

use std::fs::{self, File, Metadata};
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::Config;
use crate::error::AnalysisError;
use crate::filter::extension_of;
use crate::types::FileRecord;

/// Number of leading bytes sampled for binary detection
pub const SAMPLE_SIZE: usize = 8192;

/// Share of control bytes in the sample at which a file counts as binary
pub const BINARY_RATIO: f32 = 0.1;

/// Classify a byte sample.
///
/// Any NUL byte means binary. Otherwise the sample is binary when at least
/// 10% of it is control bytes other than tab, newline, vertical tab, form
/// feed, carriage return and escape. An empty sample is text.
pub fn is_binary_sample(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }

    let control = sample
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32 && b != 27))
        .count();
    control as f32 / sample.len() as f32 >= BINARY_RATIO
}

/// Turns a path into a [`FileRecord`]
#[derive(Debug, Clone)]
pub struct FileAnalyzer {
    load_content: bool,
    replace_invalid_chars: bool,
    max_content_size: Option<u64>,
}

impl FileAnalyzer {
    /// Create an analyzer; `load_content` is whether any output needs file text
    pub fn new(config: &Config, load_content: bool) -> Self {
        Self {
            load_content,
            replace_invalid_chars: config.replace_invalid_chars,
            max_content_size: config.max_content_size,
        }
    }

    /// Analyze a file, reporting it under the path as given
    pub fn analyze(&self, path: &Path) -> Result<FileRecord, AnalysisError> {
        self.analyze_as(path, path.to_path_buf())
    }

    /// Analyze a file, reporting it under `relative_path`
    pub fn analyze_as(
        &self,
        path: &Path,
        relative_path: PathBuf,
    ) -> Result<FileRecord, AnalysisError> {
        let unreadable = |source| AnalysisError::Unreadable {
            path: path.to_path_buf(),
            source,
        };

        let resolved = fs::canonicalize(path).map_err(unreadable)?;
        let metadata = fs::metadata(&resolved).map_err(unreadable)?;
        let size = metadata.len();

        let mut file = File::open(&resolved).map_err(unreadable)?;
        let mut sample = Vec::with_capacity(SAMPLE_SIZE.min(size as usize));
        file.by_ref()
            .take(SAMPLE_SIZE as u64)
            .read_to_end(&mut sample)
            .map_err(unreadable)?;
        let is_binary = is_binary_sample(&sample);

        let content = if is_binary || !self.load_content {
            None
        } else if self.max_content_size.is_some_and(|max| size > max) {
            debug!(path = %resolved.display(), size, "content over size cap, not loaded");
            None
        } else {
            let mut bytes = sample;
            file.read_to_end(&mut bytes).map_err(unreadable)?;
            Some(self.decode(bytes, &resolved)?)
        };

        debug!(path = %resolved.display(), size, is_binary, "analyzed file");

        Ok(FileRecord {
            extension: extension_of(&resolved),
            path: resolved,
            relative_path,
            size,
            is_binary,
            modified: modified_time(&metadata),
            permissions: permissions(&metadata),
            content,
        })
    }

    fn decode(&self, bytes: Vec<u8>, path: &Path) -> Result<String, AnalysisError> {
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) if self.replace_invalid_chars => {
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
            Err(_) => Err(AnalysisError::InvalidEncoding {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn modified_time(metadata: &Metadata) -> Option<DateTime<Utc>> {
    metadata.modified().ok().map(DateTime::<Utc>::from)
}

#[cfg(unix)]
fn permissions(metadata: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:o}", metadata.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permissions(metadata: &Metadata) -> String {
    if metadata.permissions().readonly() {
        "444".to_string()
    } else {
        "644".to_string()
    }
}
