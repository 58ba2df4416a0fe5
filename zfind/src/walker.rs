//! Parallel tree walker.
//!
//! A thin layer over the `ignore` crate's parallel walker. The callback passed
//! to [`walk`] is invoked concurrently from every worker thread, so it must be
//! `Sync`: either lock-free (handing paths to a single consumer) or internally
//! synchronized.
//!
//! Symbolic links are followed by default; loops are detected by `ignore` and
//! show up as per-entry errors. Per-entry errors are handed to the callback
//! and never abort the walk. Only problems with the root itself are returned
//! from [`walk`].
use ignore::{WalkBuilder, WalkState};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::{debug, dispatcher};

use crate::config::ZfindConfig;
use crate::errors::{EnumerateError, EnumerateResult};
use crate::filters::relative_path_string;

/// What the walker should do after an entry has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Keep walking, descending into the entry if it is a directory
    Continue,
    /// Do not descend into this directory
    SkipSubtree,
    /// The entry was ignored; keep walking
    SkipEntry,
}

impl From<Visit> for WalkState {
    fn from(visit: Visit) -> Self {
        match visit {
            Visit::Continue | Visit::SkipEntry => WalkState::Continue,
            Visit::SkipSubtree => WalkState::Skip,
        }
    }
}

/// A successfully read entry
#[derive(Debug, Clone, Copy)]
pub struct WalkEntry<'a> {
    /// Root the walk started from
    pub root: &'a Path,
    /// Full path of the entry (the root joined with its relative path)
    pub path: &'a Path,
    /// Distance from the root; the root itself has depth 0
    pub depth: usize,
    /// Whether the entry is a directory (after following links)
    pub is_dir: bool,
}

impl WalkEntry<'_> {
    /// The entry's path relative to the walk root, if it is valid UTF-8
    pub fn relative_path(&self) -> Option<String> {
        relative_path_string(self.root, self.path)
    }
}

/// One callback invocation: either an entry or a per-entry error
#[derive(Debug)]
pub enum WalkEvent<'a> {
    Entry(WalkEntry<'a>),
    Error(&'a ignore::Error),
}

/// Tunables for the underlying traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    pub follow_links: bool,
    pub respect_gitignore: bool,
    pub threads: NonZeroUsize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            follow_links: true,
            respect_gitignore: false,
            threads: NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl From<&ZfindConfig> for WalkOptions {
    fn from(config: &ZfindConfig) -> Self {
        Self {
            follow_links: config.follow_links,
            respect_gitignore: config.respect_gitignore,
            threads: config.thread_count,
        }
    }
}

/// Makes sure the root exists, is a directory, and can be listed.
pub fn check_root(root: &Path) -> EnumerateResult<()> {
    let metadata = fs::metadata(root).map_err(|e| EnumerateError::from_root_io(root, e))?;
    if !metadata.is_dir() {
        return Err(EnumerateError::not_a_directory(root));
    }
    fs::read_dir(root).map_err(|e| EnumerateError::from_root_io(root, e))?;
    Ok(())
}

/// Builds the `ignore` walker configured from `options`.
pub(crate) fn builder(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(options.follow_links)
        .git_ignore(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .require_git(false)
        .threads(options.threads.get());
    builder
}

/// Walks `root` in parallel, calling `on_entry` for every entry and error.
///
/// Returns once every worker has finished, so no invocation of `on_entry` is
/// still running when this function returns.
pub fn walk<F>(root: &Path, options: &WalkOptions, on_entry: F) -> EnumerateResult<()>
where
    F: Fn(WalkEvent<'_>) -> Visit + Sync,
{
    check_root(root)?;
    walk_checked(root, options, on_entry);
    Ok(())
}

/// [`walk`] for a root that has already passed [`check_root`].
pub(crate) fn walk_checked<F>(root: &Path, options: &WalkOptions, on_entry: F)
where
    F: Fn(WalkEvent<'_>) -> Visit + Sync,
{
    debug!(
        "Walking {} with {} threads (follow_links: {})",
        root.display(),
        options.threads,
        options.follow_links
    );

    // Worker threads do not inherit the caller's scoped subscriber
    let dispatch = dispatcher::get_default(|d| d.clone());
    let on_entry = &on_entry;

    builder(root, options).build_parallel().run(|| {
        let dispatch = dispatch.clone();
        Box::new(move |result| {
            let visit = dispatcher::with_default(&dispatch, || match result {
                Ok(entry) => {
                    let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                    on_entry(WalkEvent::Entry(WalkEntry {
                        root,
                        path: entry.path(),
                        depth: entry.depth(),
                        is_dir,
                    }))
                }
                Err(err) => on_entry(WalkEvent::Error(&err)),
            });
            visit.into()
        })
    });
}
