use parking_lot::RwLock;

use super::Aggregator;
use crate::errors::EnumerateResult;

/// Aggregator backed by a vector behind a reader/writer lock.
///
/// Every append takes the write lock for the duration of one push. Readers
/// take the shared lock and copy, so iteration never holds the lock while the
/// caller works through the paths. There is nothing to close: once the walk
/// has returned there are no writers left.
#[derive(Debug, Default)]
pub struct LockAggregator {
    paths: RwLock<Vec<String>>,
}

impl LockAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            paths: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    /// Copies the current contents under the shared lock
    pub fn snapshot(&self) -> Vec<String> {
        self.paths.read().clone()
    }

    /// Iterates over a snapshot taken at call time
    pub fn iter(&self) -> std::vec::IntoIter<String> {
        self.snapshot().into_iter()
    }

    pub fn len(&self) -> usize {
        self.paths.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Aggregator for LockAggregator {
    fn append(&self, path: String) {
        self.paths.write().push(path);
    }

    fn finalize(self) -> EnumerateResult<Vec<String>> {
        Ok(self.paths.into_inner())
    }
}
