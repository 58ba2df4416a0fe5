//! Enumeration entrypoint.
//!
//! [`enumerate`] walks a root directory with the traversal filter policy and
//! returns every discovered file as a path relative to the root. The
//! aggregation strategy is picked by the caller, or by [`resolve_strategy`]
//! when the caller asks for `Auto`.
//!
//! Nothing is kept between calls; every enumeration builds its own walker,
//! aggregator and counters.
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

use crate::aggregate::{
    Aggregator, AggregatorKind, AggregatorStrategy, ChannelAggregator, LockAggregator,
};
use crate::config::ZfindConfig;
use crate::errors::EnumerateResult;
use crate::filters::{FilterDecision, TraversalFilter};
use crate::metrics::{WalkStats, WalkStatsSnapshot};
use crate::walker::{self, Visit, WalkEvent, WalkOptions};

/// Depth limit for the `auto` size probe
const PROBE_MAX_DEPTH: usize = 4;

/// Everything an enumeration needs to know
#[derive(Debug, Clone)]
pub struct EnumerateOptions {
    pub root: PathBuf,
    pub strategy: AggregatorStrategy,
    pub channel_capacity: usize,
    pub auto_threshold: usize,
    pub filter: TraversalFilter,
    pub walk: WalkOptions,
}

impl EnumerateOptions {
    /// Options with default settings for `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let defaults = ZfindConfig::default();
        Self {
            root: root.into(),
            ..Self::from_config(&defaults)
        }
    }

    pub fn from_config(config: &ZfindConfig) -> Self {
        Self {
            root: config.root_path.clone(),
            strategy: config.strategy,
            channel_capacity: config.channel_capacity,
            auto_threshold: config.auto_threshold,
            filter: TraversalFilter::new(config.vcs_dirs.clone()),
            walk: WalkOptions::from(config),
        }
    }

    pub fn with_strategy(mut self, strategy: AggregatorStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// A completed enumeration
#[derive(Debug, Clone)]
pub struct Enumeration {
    /// Discovered files, relative to the root, in arrival order
    pub paths: Vec<String>,
    /// The aggregator that collected them
    pub strategy: AggregatorKind,
    pub stats: WalkStatsSnapshot,
    pub elapsed: Duration,
}

/// Enumerates every file under `root` using `strategy`.
///
/// Returns an error only when the walk as a whole cannot happen (missing,
/// unreadable or non-directory root). Unreadable entries below the root are
/// skipped.
pub fn enumerate(
    root: impl AsRef<Path>,
    strategy: AggregatorStrategy,
) -> EnumerateResult<Vec<String>> {
    let options = EnumerateOptions::new(root.as_ref()).with_strategy(strategy);
    enumerate_with(&options).map(|enumeration| enumeration.paths)
}

/// Enumerates with full control over the options, returning statistics too
pub fn enumerate_with(options: &EnumerateOptions) -> EnumerateResult<Enumeration> {
    let start = Instant::now();
    info!(
        "Enumerating {} (strategy: {})",
        options.root.display(),
        options.strategy
    );

    walker::check_root(&options.root)?;
    let strategy = resolve_strategy(options);
    let stats = WalkStats::new();

    let paths = match strategy {
        AggregatorKind::Channel => collect(
            ChannelAggregator::new(options.channel_capacity)?,
            options,
            &stats,
        )?,
        AggregatorKind::Lock => collect(LockAggregator::new(), options, &stats)?,
    };

    stats.log_stats();
    let elapsed = start.elapsed();
    info!(
        "Enumerated {} files in {:?} using the {} strategy",
        paths.len(),
        elapsed,
        strategy
    );

    Ok(Enumeration {
        paths,
        strategy,
        stats: stats.snapshot(),
        elapsed,
    })
}

/// Runs the walk feeding `aggregator`, then finalizes it.
fn collect<A: Aggregator>(
    aggregator: A,
    options: &EnumerateOptions,
    stats: &WalkStats,
) -> EnumerateResult<Vec<String>> {
    let filter = &options.filter;
    walker::walk_checked(&options.root, &options.walk, |event| match event {
        WalkEvent::Error(err) => {
            stats.record_error();
            debug!("Skipping unreadable entry: {}", err);
            Visit::Continue
        }
        WalkEvent::Entry(entry) => match filter.decide(&entry) {
            FilterDecision::Emit => match entry.relative_path() {
                Some(path) => {
                    stats.record_file();
                    trace!("Found {}", path);
                    aggregator.append(path);
                    Visit::Continue
                }
                None => {
                    stats.record_error();
                    debug!("Skipping non UTF-8 path: {}", entry.path.display());
                    Visit::Continue
                }
            },
            FilterDecision::Pass => {
                if entry.depth > 0 {
                    stats.record_dir();
                }
                Visit::SkipEntry
            }
            FilterDecision::Prune => {
                stats.record_pruned();
                Visit::SkipSubtree
            }
        },
    });

    aggregator.finalize()
}

/// Turns the requested strategy into the one that will actually run.
///
/// `Auto` probes the tree: when the probe finds at least `auto_threshold`
/// files the channel strategy is used, otherwise the lock strategy.
pub fn resolve_strategy(options: &EnumerateOptions) -> AggregatorKind {
    match options.strategy {
        AggregatorStrategy::Channel => AggregatorKind::Channel,
        AggregatorStrategy::Lock => AggregatorKind::Lock,
        AggregatorStrategy::Auto => {
            let estimate = estimate_tree_size(
                &options.root,
                &options.filter,
                &options.walk,
                options.auto_threshold,
            );
            let kind = if estimate >= options.auto_threshold {
                AggregatorKind::Channel
            } else {
                AggregatorKind::Lock
            };
            debug!(
                "Probe found {} files (threshold {}), using the {} strategy",
                estimate, options.auto_threshold, kind
            );
            kind
        }
    }
}

/// Counts files in the top levels of the tree, stopping at `limit`.
///
/// Uses the same filter policy as the real walk but runs sequentially and
/// only a few levels deep, so the result is a lower bound on the tree size.
pub fn estimate_tree_size(
    root: &Path,
    filter: &TraversalFilter,
    walk: &WalkOptions,
    limit: usize,
) -> usize {
    let prune = filter.clone();
    let mut builder = walker::builder(root, walk);
    builder
        .max_depth(Some(PROBE_MAX_DEPTH))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            prune.decide_parts(entry.depth(), entry.path(), is_dir) != FilterDecision::Prune
        });

    builder
        .build()
        .filter_map(Result::ok)
        .filter(|entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            filter.decide_parts(entry.depth(), entry.path(), is_dir) == FilterDecision::Emit
        })
        .take(limit)
        .count()
}
