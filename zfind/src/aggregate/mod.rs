//! Result aggregation for concurrent tree walks.
//!
//! Walker callbacks run on many threads at once, and every discovered path has
//! to end up in one ordered `Vec<String>`. Two interchangeable strategies are
//! provided so their costs can be measured against each other:
//!
//! 1. **Channel** ([`ChannelAggregator`]): producers push into a bounded queue
//!    and a single collector thread owns the backing vector. Producers never
//!    contend with each other, only with queue capacity.
//!
//! 2. **Lock** ([`LockAggregator`]): producers take an exclusive write lock on
//!    a shared vector, push, and release. There is no extra thread and no
//!    queue, which makes it cheaper for small trees; contention grows with the
//!    number of files.
//!
//! Neither strategy promises an order. Output reflects arrival order, which
//! is a valid interleaving of the concurrent producers and nothing more.
//!
//! ```rust,ignore
//! let aggregator = ChannelAggregator::new(1000)?;
//! walk(root, &options, |event| {
//!     // called from many worker threads
//!     aggregator.append(path);
//!     Visit::Continue
//! })?;
//! let paths = aggregator.finalize()?;
//! ```
mod channel;
mod locked;

pub use channel::ChannelAggregator;
pub use locked::LockAggregator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{EnumerateError, EnumerateResult};

/// Collects paths from concurrent producers into one sequence
pub trait Aggregator: Send + Sync {
    /// Adds a path; safe to call from any number of threads at once
    fn append(&self, path: String);

    /// Consumes the aggregator once every producer is done
    fn finalize(self) -> EnumerateResult<Vec<String>>
    where
        Self: Sized;
}

/// Strategy requested by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregatorStrategy {
    Channel,
    Lock,
    /// Probe the tree and pick based on its estimated size
    #[default]
    Auto,
}

/// The concrete aggregator an enumeration ran with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregatorKind {
    Channel,
    Lock,
}

impl FromStr for AggregatorStrategy {
    type Err = EnumerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "channel" | "chan" => Ok(Self::Channel),
            "lock" | "mutex" => Ok(Self::Lock),
            "auto" => Ok(Self::Auto),
            other => Err(EnumerateError::config_error(format!(
                "Unknown strategy '{}' (expected channel, lock or auto)",
                other
            ))),
        }
    }
}

impl fmt::Display for AggregatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel => write!(f, "channel"),
            Self::Lock => write!(f, "lock"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

impl fmt::Display for AggregatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel => write!(f, "channel"),
            Self::Lock => write!(f, "lock"),
        }
    }
}
