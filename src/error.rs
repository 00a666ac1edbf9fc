//! Global error handling for singlefile
//!
//! This module provides a centralized error type covering configuration,
//! traversal, per-file analysis and output generation failures.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Per-file analysis failures
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The file could not be stat'ed or read
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Text content is not valid UTF-8 and replacement is disabled
    #[error("invalid UTF-8 in {path}")]
    InvalidEncoding { path: PathBuf },

    /// Following a symbolic link led back to one of its ancestors
    #[error("symlink loop detected: {path}")]
    SymlinkLoop { path: PathBuf },
}

impl AnalysisError {
    /// Path of the file the failure refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Unreadable { path, .. }
            | Self::InvalidEncoding { path }
            | Self::SymlinkLoop { path } => path,
        }
    }
}

/// Global error type for singlefile operations
#[derive(Error, Debug)]
pub enum SingleFileError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A filter pattern failed to compile
    #[error("Configuration error: invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A root path is missing or a directory could not be listed
    #[error("Traversal error at {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Per-file analysis errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Plugin render or output write failure
    #[error("Generation error in `{plugin}`: {message}")]
    Generation { plugin: String, message: String },

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Formatting into an in-memory buffer failed
    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Specialized Result type for singlefile operations
pub type Result<T> = std::result::Result<T, SingleFileError>;

/// Creates a SingleFileError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::SingleFileError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

// Lets the binary keep an io::Result main
impl From<SingleFileError> for io::Error {
    fn from(err: SingleFileError) -> Self {
        match err {
            SingleFileError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
