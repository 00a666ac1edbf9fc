/*!
 * singlefile - Flatten a directory tree into single-file codebase snapshots
 *
 * The library walks one or more roots, filters entries by extension and
 * name patterns, analyzes each accepted file and renders the resulting
 * snapshot through a registry of output plugins.
 */

pub mod analyzer;
pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod guide;
pub mod logging;
pub mod plugins;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;


// Re-export main components for easier access
pub use analyzer::FileAnalyzer;
pub use config::{Args, Config};
pub use error::{AnalysisError, Result, SingleFileError};
pub use filter::PathFilter;
pub use generator::{GenerationSummary, OutputGenerator};
pub use plugins::{BuiltinFormat, Plugin, PluginRegistry};
pub use report::{Reporter, RunReport};
pub use scanner::Scanner;
pub use types::{CodebaseSnapshot, FileRecord, SkippedEntry};
pub use utils::format_file_size;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
