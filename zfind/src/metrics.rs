use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Counters updated by walker threads during an enumeration
#[derive(Debug, Default)]
pub struct WalkStats {
    files_emitted: AtomicU64,
    dirs_visited: AtomicU64,
    subtrees_pruned: AtomicU64,
    errors_skipped: AtomicU64,
}

impl WalkStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a path handed to the aggregator
    pub fn record_file(&self) {
        self.files_emitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a directory that was descended into
    pub fn record_dir(&self) {
        self.dirs_visited.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a version-control directory skipped with its subtree
    pub fn record_pruned(&self) {
        self.subtrees_pruned.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a per-entry error that was swallowed
    pub fn record_error(&self) {
        self.errors_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> WalkStatsSnapshot {
        WalkStatsSnapshot {
            files_emitted: self.files_emitted.load(Ordering::Relaxed),
            dirs_visited: self.dirs_visited.load(Ordering::Relaxed),
            subtrees_pruned: self.subtrees_pruned.load(Ordering::Relaxed),
            errors_skipped: self.errors_skipped.load(Ordering::Relaxed),
        }
    }

    /// Logs current walk statistics
    pub fn log_stats(&self) {
        let stats = self.snapshot();
        info!(
            "Walk stats: {} files, {} directories, {} pruned subtrees, {} skipped errors",
            stats.files_emitted, stats.dirs_visited, stats.subtrees_pruned, stats.errors_skipped
        );
    }
}

/// Plain copy of [`WalkStats`] taken after a walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStatsSnapshot {
    pub files_emitted: u64,
    pub dirs_visited: u64,
    pub subtrees_pruned: u64,
    pub errors_skipped: u64,
}
