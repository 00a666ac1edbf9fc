/*!
 * Directory and file scanning functionality
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::analyzer::FileAnalyzer;
use crate::config::Config;
use crate::error::{AnalysisError, Result, SingleFileError};
use crate::filter::PathFilter;
use crate::plugins::PluginRegistry;
use crate::types::{CodebaseSnapshot, FileRecord, SkippedEntry};

/// A file accepted by the filters, waiting for analysis
#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    relative_path: PathBuf,
}

/// A traversal step, or the failing path with its error
type Step<T> = std::result::Result<T, (PathBuf, SingleFileError)>;

/// Walks the configured roots and builds a [`CodebaseSnapshot`].
///
/// Directories are walked depth-first. Inside a directory, files come
/// before subdirectories and each group is sorted by file name.
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Compiled filter rules
    filter: PathFilter,
    /// Per-file analyzer
    analyzer: FileAnalyzer,
    /// Canonical paths of this run's own output files
    output_files: Vec<PathBuf>,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a scanner for the plugins currently in `registry`
    pub fn new(
        config: Config,
        registry: &PluginRegistry,
        progress: Arc<ProgressBar>,
    ) -> Result<Self> {
        let filter = PathFilter::new(&config)?;
        let analyzer = FileAnalyzer::new(&config, registry.needs_content());
        let output_files = registry
            .names()
            .into_iter()
            .filter_map(|name| canonical_output(&config.output_path(&name)))
            .collect();

        Ok(Self {
            config,
            filter,
            analyzer,
            output_files,
            progress,
        })
    }

    /// The filter this scanner applies
    pub fn filter(&self) -> &PathFilter {
        &self.filter
    }

    /// Scan every root and return the snapshot.
    ///
    /// Roots are handled one at a time. Under abort-on-error the failure
    /// earliest in traversal order is returned, whether it came from the
    /// walk or from analysis.
    pub fn scan(&self) -> Result<CodebaseSnapshot> {
        let mut snapshot =
            CodebaseSnapshot::new(self.config.paths.clone(), self.config.absolute_paths);

        for root in &self.config.paths {
            let steps = self.collect_root(root);
            let accepted = steps.iter().filter(|step| step.is_ok()).count();
            info!(root = %root.display(), files = accepted, "analyzing accepted files");
            self.progress.inc_length(accepted as u64);

            // Indexed collect: results stay in traversal order
            let results: Vec<Step<FileRecord>> = steps
                .into_par_iter()
                .map(|step| step.and_then(|candidate| self.analyze(&candidate)))
                .collect();

            for result in results {
                match result {
                    Ok(record) => snapshot.files.push(record),
                    Err((path, error)) => self.skip(error, path, &mut snapshot.skipped)?,
                }
            }
        }

        info!(
            files = snapshot.files.len(),
            skipped = snapshot.skipped.len(),
            "scan complete"
        );
        Ok(snapshot)
    }

    fn analyze(&self, candidate: &Candidate) -> Step<FileRecord> {
        let result = self
            .analyzer
            .analyze_as(&candidate.path, candidate.relative_path.clone())
            .map_err(|e| (e.path().clone(), SingleFileError::from(e)));
        self.progress.inc(1);
        result
    }

    /// Record an error under continue-on-error, or return it under abort-on-error
    fn skip(
        &self,
        error: SingleFileError,
        path: PathBuf,
        skipped: &mut Vec<SkippedEntry>,
    ) -> Result<()> {
        if !self.config.ignore_errors {
            return Err(error);
        }

        warn!(path = %path.display(), "skipping: {}", error);
        skipped.push(SkippedEntry {
            path,
            reason: error.to_string(),
        });
        Ok(())
    }

    /// Accepted files and walk failures below one root, in traversal order.
    ///
    /// Under abort-on-error the walk stops at its first failure.
    fn collect_root(&self, root: &Path) -> Vec<Step<Candidate>> {
        let metadata = match fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(source) => {
                let error = SingleFileError::Traversal {
                    path: root.to_path_buf(),
                    source,
                };
                return vec![Err((root.to_path_buf(), error))];
            }
        };

        if !metadata.is_dir() {
            let is_link = fs::symlink_metadata(root).is_ok_and(|m| m.file_type().is_symlink());
            if !self.accepts(root, is_link) {
                return Vec::new();
            }
            return vec![Ok(Candidate {
                path: root.to_path_buf(),
                relative_path: root.to_path_buf(),
            })];
        }

        debug!(root = %root.display(), "walking directory");
        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by(|a, b| {
                (a.file_type().is_dir(), a.file_name()).cmp(&(b.file_type().is_dir(), b.file_name()))
            })
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || self.filter.should_descend(e.path(), e.depth())
            });

        let mut steps = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    let error = if err.loop_ancestor().is_some() {
                        SingleFileError::from(AnalysisError::SymlinkLoop { path: path.clone() })
                    } else if err.depth() == 0 {
                        SingleFileError::Traversal {
                            path: path.clone(),
                            source: err.into(),
                        }
                    } else {
                        SingleFileError::from(AnalysisError::Unreadable {
                            path: path.clone(),
                            source: err.into(),
                        })
                    };
                    steps.push(Err((path, error)));
                    if !self.config.ignore_errors {
                        break;
                    }
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_symlink() {
                debug!(path = %entry.path().display(), "not following symlink");
                continue;
            }
            if !file_type.is_file() || !self.accepts(entry.path(), entry.path_is_symlink()) {
                continue;
            }

            steps.push(Ok(Candidate {
                path: entry.path().to_path_buf(),
                relative_path: entry.path().to_path_buf(),
            }));
        }

        steps
    }

    /// File filters plus exclusion of this run's own outputs.
    ///
    /// A link must pass under its own name and under its target's name.
    fn accepts(&self, path: &Path, is_link: bool) -> bool {
        if !self.filter.should_include(path) || self.is_output_file(path) {
            return false;
        }
        if !is_link {
            return true;
        }
        match fs::canonicalize(path) {
            Ok(target) => {
                let accepted = self.filter.should_include(&target);
                if !accepted {
                    debug!(path = %path.display(), target = %target.display(), "link target rejected");
                }
                accepted
            }
            // Dangling links fail later, during analysis
            Err(_) => true,
        }
    }

    fn is_output_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        if !self.output_files.iter().any(|o| o.file_name() == Some(name)) {
            return false;
        }
        fs::canonicalize(path).is_ok_and(|resolved| self.output_files.contains(&resolved))
    }
}

/// Canonical form of an output path whose parent directory exists
fn canonical_output(path: &Path) -> Option<PathBuf> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let dir = fs::canonicalize(parent).ok()?;
    Some(dir.join(path.file_name()?))
}
