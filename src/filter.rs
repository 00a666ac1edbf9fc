/*!
 * Path filtering: which directories are descended and which files are kept
 */

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, SingleFileError};

/// Compiled inclusion and exclusion rules for one run
#[derive(Debug, Clone)]
pub struct PathFilter {
    max_depth: usize,
    extensions: HashSet<String>,
    exclude_extensions: HashSet<String>,
    include_dirs: Vec<Regex>,
    exclude_dirs: Vec<Regex>,
    include_files: Vec<Regex>,
    exclude_files: Vec<Regex>,
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| SingleFileError::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

/// Base name of a path, lossily decoded
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Lower-cased final dotted suffix of the file name, empty if none.
///
/// Dotfiles such as `.bashrc` have no extension.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

impl PathFilter {
    /// Compile the filter rules of a configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            max_depth: config.max_depth,
            extensions: config.extensions.iter().cloned().collect(),
            exclude_extensions: config.exclude_extensions.iter().cloned().collect(),
            include_dirs: compile(&config.include_dirs)?,
            exclude_dirs: compile(&config.exclude_dirs)?,
            include_files: compile(&config.include_files)?,
            exclude_files: compile(&config.exclude_files)?,
        })
    }

    /// Decide whether to enter a directory found at `depth` (roots are depth 0)
    pub fn should_descend(&self, dir: &Path, depth: usize) -> bool {
        if depth > self.max_depth {
            debug!(path = %dir.display(), depth, "depth limit reached");
            return false;
        }

        let name = base_name(dir);
        if self.exclude_dirs.iter().any(|re| re.is_match(&name)) {
            debug!(path = %dir.display(), "directory excluded by pattern");
            return false;
        }

        if !self.include_dirs.is_empty() && !self.include_dirs.iter().any(|re| re.is_match(&name))
        {
            debug!(path = %dir.display(), "directory not matched by include patterns");
            return false;
        }

        true
    }

    /// Decide whether a file is accepted into the snapshot
    pub fn should_include(&self, file: &Path) -> bool {
        let extension = extension_of(file);

        if self.exclude_extensions.contains(&extension) {
            debug!(path = %file.display(), %extension, "extension excluded");
            return false;
        }

        if !self.extensions.is_empty() && !self.extensions.contains(&extension) {
            debug!(path = %file.display(), %extension, "extension not allowed");
            return false;
        }

        let name = base_name(file);
        if self.exclude_files.iter().any(|re| re.is_match(&name)) {
            debug!(path = %file.display(), "file excluded by pattern");
            return false;
        }

        if !self.include_files.is_empty()
            && !self.include_files.iter().any(|re| re.is_match(&name))
        {
            debug!(path = %file.display(), "file not matched by include patterns");
            return false;
        }

        true
    }
}
