//! Error types for directory enumeration and the picker built on top of it.
//!
//! # Error Categories
//!
//! Enumeration distinguishes two very different kinds of failure:
//!
//! 1. **Per-entry errors** (permission denied on a subdirectory, a file that
//!    vanished mid-walk, a dangling symlink, a symlink loop) never reach this
//!    type. The walker counts them and keeps going, so one unreadable subtree
//!    cannot hide the rest of the tree.
//!
//! 2. **Walk-level errors** (the root is missing, unreadable, or not a
//!    directory) abort the whole enumeration. They are returned as a single
//!    `EnumerateError` and no partial path list is ever produced.
//!
//! ```rust,ignore
//! match enumerate(root, AggregatorStrategy::Channel) {
//!     Ok(paths) => // hand the complete list to the picker,
//!     Err(EnumerateError::RootNotFound(path)) => // abort startup,
//!     Err(e) => // any other walk-level failure
//! }
//! ```
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for enumeration and picker operations
pub type EnumerateResult<T> = Result<T, EnumerateError>;

/// Errors that abort an enumeration or a picker session
#[derive(Error, Debug)]
pub enum EnumerateError {
    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Path collector failed: {0}")]
    Collector(String),
    #[error("Terminal error: {0}")]
    TerminalError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EnumerateError {
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory(path.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn collector(msg: impl Into<String>) -> Self {
        Self::Collector(msg.into())
    }

    pub fn terminal_error(msg: impl Into<String>) -> Self {
        Self::TerminalError(msg.into())
    }

    /// Maps an I/O error raised while opening the root onto a walk-level error.
    pub fn from_root_io(root: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::root_not_found(root),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(root),
            _ => Self::IoError(err),
        }
    }
}
