/*!
 * Configuration handling for singlefile
 */

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;
use crate::filter::PathFilter;

/// Command-line arguments for singlefile
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "singlefile",
    version = env!("CARGO_PKG_VERSION"),
    about = "Flatten a directory tree into single-file codebase snapshots",
    long_about = "Walks one or more directory trees, selects files by extension and pattern rules, and writes one output file per requested format (flattened text, JSON, Markdown, XML)."
)]
pub struct Args {
    /// Directories or files to process
    #[clap(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output file stem; the format name is appended as a suffix
    #[clap(short, long, default_value = "codebase")]
    pub output_file: PathBuf,

    /// Comma-separated list of output formats
    #[clap(long, value_delimiter = ',', default_value = "default")]
    pub formats: Vec<String>,

    /// Maximum directory depth to descend (0 = root directories only)
    #[clap(long)]
    pub depth: Option<usize>,

    /// Show absolute paths in the generated outputs
    #[clap(long)]
    pub absolute_paths: bool,

    /// Comma-separated list of extensions to include (without leading dot)
    #[clap(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Comma-separated list of extensions to exclude
    #[clap(long, value_delimiter = ',')]
    pub exclude_extensions: Vec<String>,

    /// Regular expressions for directory names to skip
    #[clap(long, value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,

    /// Regular expressions for directory names to descend into
    #[clap(long, value_delimiter = ',')]
    pub include_dirs: Vec<String>,

    /// Regular expressions for file names to skip
    #[clap(long, value_delimiter = ',')]
    pub exclude_files: Vec<String>,

    /// Regular expressions for file names to include
    #[clap(long, value_delimiter = ',')]
    pub include_files: Vec<String>,

    /// Keep going when a file or format fails
    #[clap(long)]
    pub ignore_errors: bool,

    /// Replace characters that are invalid in the output instead of failing
    #[clap(long)]
    pub replace_invalid_chars: bool,

    /// Print the usage guide and exit
    #[clap(long)]
    pub show_guide: bool,

    /// Follow symbolic links while walking
    #[clap(long)]
    pub follow_symlinks: bool,

    /// Skip loading content of files larger than this many bytes
    #[clap(long, value_name = "BYTES")]
    pub max_content_size: Option<u64>,

    /// Number of threads to use for file analysis
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration, fixed for the duration of a run
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directories or files to process
    pub paths: Vec<PathBuf>,

    /// Maximum directory depth; 0 means only the roots themselves
    pub max_depth: usize,

    /// Display absolute paths in outputs
    pub absolute_paths: bool,

    /// Allowed extensions (if empty, no restriction)
    pub extensions: Vec<String>,

    /// Excluded extensions
    pub exclude_extensions: Vec<String>,

    /// Directory name patterns to include (if empty, include all)
    pub include_dirs: Vec<String>,

    /// Directory name patterns to exclude
    pub exclude_dirs: Vec<String>,

    /// File name patterns to include (if empty, include all)
    pub include_files: Vec<String>,

    /// File name patterns to exclude
    pub exclude_files: Vec<String>,

    /// Output file stem
    pub output_stem: PathBuf,

    /// Requested output formats, in request order
    pub formats: Vec<String>,

    /// Continue on per-file and per-format errors
    pub ignore_errors: bool,

    /// Substitute invalid characters instead of failing
    pub replace_invalid_chars: bool,

    /// Follow symbolic links
    pub follow_symlinks: bool,

    /// Content size cap in bytes
    pub max_content_size: Option<u64>,

    /// Number of threads to use for processing
    pub num_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from(".")],
            max_depth: usize::MAX,
            absolute_paths: false,
            extensions: Vec::new(),
            exclude_extensions: Vec::new(),
            include_dirs: Vec::new(),
            exclude_dirs: Vec::new(),
            include_files: Vec::new(),
            exclude_files: Vec::new(),
            output_stem: PathBuf::from("codebase"),
            formats: vec!["default".to_string()],
            ignore_errors: false,
            replace_invalid_chars: false,
            follow_symlinks: false,
            max_content_size: None,
            num_threads: 4,
        }
    }
}

/// Strip a leading dot and lower-case an extension
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Drop empty patterns; patterns are otherwise kept verbatim
fn normalize_patterns(values: Vec<String>) -> Vec<String> {
    values.into_iter().filter(|v| !v.is_empty()).collect()
}

fn normalize_formats(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            paths: args.paths,
            max_depth: args.depth.unwrap_or(usize::MAX),
            absolute_paths: args.absolute_paths,
            extensions: args
                .extensions
                .iter()
                .map(|e| normalize_extension(e))
                .collect(),
            exclude_extensions: args
                .exclude_extensions
                .iter()
                .map(|e| normalize_extension(e))
                .filter(|e| !e.is_empty())
                .collect(),
            include_dirs: normalize_patterns(args.include_dirs),
            exclude_dirs: normalize_patterns(args.exclude_dirs),
            include_files: normalize_patterns(args.include_files),
            exclude_files: normalize_patterns(args.exclude_files),
            output_stem: args.output_file,
            formats: normalize_formats(args.formats),
            ignore_errors: args.ignore_errors,
            replace_invalid_chars: args.replace_invalid_chars,
            follow_symlinks: args.follow_symlinks,
            max_content_size: args.max_content_size,
            num_threads: args.threads,
        }
    }

    /// Path of the output file written for the given format
    pub fn output_path(&self, format: &str) -> PathBuf {
        let mut name = self.output_stem.as_os_str().to_owned();
        name.push(".");
        name.push(format);
        PathBuf::from(name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.paths.is_empty(), Config, "no input paths given");
        ensure!(!self.formats.is_empty(), Config, "no output formats requested");
        ensure!(self.num_threads > 0, Config, "thread count must be at least 1");
        ensure!(
            !self.output_stem.as_os_str().is_empty(),
            Config,
            "output file stem is empty"
        );

        // Compiling the filter surfaces bad patterns
        PathFilter::new(self)?;

        // Check if output file directory exists
        if let Some(parent) = self.output_stem.parent() {
            ensure!(
                parent == Path::new("") || parent.is_dir(),
                Config,
                "Output directory not found: {}",
                parent.display()
            );
        }

        Ok(())
    }
}
