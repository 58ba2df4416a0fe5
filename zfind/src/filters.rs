//! Traversal filter policy applied to every entry the walker visits.
//!
//! The policy is stateless and has three rules:
//!
//! 1. Directories named for version-control metadata (`.git`, `.hg`, `.svn`
//!    by default) are pruned together with their whole subtree.
//! 2. The traversal root is never emitted.
//! 3. Only non-directory entries are emitted; every other directory is
//!    descended into but not reported.
//!
//! Because the rules never look at anything but the entry itself, the same
//! policy value can be shared by every walker thread without locking.
use std::ffi::OsStr;
use std::path::{Path, MAIN_SEPARATOR};

use crate::walker::WalkEntry;

/// Version-control metadata directories skipped by default
pub const DEFAULT_VCS_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// The outcome of applying the filter policy to one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Report the entry as a discovered path
    Emit,
    /// Keep walking, but do not report the entry
    Pass,
    /// Skip the entry and everything beneath it
    Prune,
}

/// Stateless rule set deciding which entries become paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalFilter {
    vcs_dirs: Vec<String>,
}

impl Default for TraversalFilter {
    fn default() -> Self {
        Self::new(DEFAULT_VCS_DIRS.iter().map(|d| d.to_string()).collect())
    }
}

impl TraversalFilter {
    pub fn new(vcs_dirs: Vec<String>) -> Self {
        Self { vcs_dirs }
    }

    /// Checks if a directory name marks version-control metadata
    pub fn is_vcs_dir(&self, name: &OsStr) -> bool {
        match name.to_str() {
            Some(name) => self.vcs_dirs.iter().any(|d| d == name),
            None => false,
        }
    }

    /// Applies the policy to a single walked entry
    pub fn decide(&self, entry: &WalkEntry<'_>) -> FilterDecision {
        self.decide_parts(entry.depth, entry.path, entry.is_dir)
    }

    /// Applies the policy given the raw facts about an entry
    pub fn decide_parts(&self, depth: usize, path: &Path, is_dir: bool) -> FilterDecision {
        if depth == 0 {
            return FilterDecision::Pass;
        }
        if !is_dir {
            return FilterDecision::Emit;
        }
        match path.file_name() {
            Some(name) if self.is_vcs_dir(name) => FilterDecision::Prune,
            _ => FilterDecision::Pass,
        }
    }
}

/// Renders `path` relative to `root` as a forward-slash separated string.
///
/// Paths that do not live under `root` are rendered as-is. Returns `None` for
/// paths that are not valid UTF-8; a lossy rendering would name a file that
/// does not exist and could collide with another entry.
pub fn relative_path_string(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).unwrap_or(path).to_str()?;
    if MAIN_SEPARATOR == '/' {
        Some(relative.to_string())
    } else {
        Some(relative.replace(MAIN_SEPARATOR, "/"))
    }
}
