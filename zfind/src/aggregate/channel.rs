use crossbeam_channel::{bounded, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, dispatcher};

use super::Aggregator;
use crate::errors::{EnumerateError, EnumerateResult};

/// Aggregator backed by a bounded queue and a single collector thread.
///
/// The collector thread is the only writer of the backing vector, so the
/// vector itself needs no synchronization. It is not read until the queue has
/// been closed and the thread joined.
///
/// Producers block only when the queue is full. That is the backpressure that
/// keeps a fast traversal from outrunning the collector.
///
/// The queue closes when the sender is dropped: in [`finalize`] on the normal
/// path, or when the aggregator itself is dropped on any other path, so the
/// collector thread always exits.
///
/// [`finalize`]: Aggregator::finalize
pub struct ChannelAggregator {
    sender: Sender<String>,
    collector: JoinHandle<Vec<String>>,
    capacity: usize,
}

impl ChannelAggregator {
    /// Spawns the collector thread behind a queue of `capacity` slots
    pub fn new(capacity: usize) -> EnumerateResult<Self> {
        if capacity == 0 {
            return Err(EnumerateError::config_error(
                "channel capacity must be greater than zero",
            ));
        }

        let (sender, receiver) = bounded::<String>(capacity);
        let dispatch = dispatcher::get_default(|d| d.clone());

        let collector = thread::Builder::new()
            .name("zfind-collector".to_string())
            .spawn(move || {
                dispatcher::with_default(&dispatch, || {
                    let mut paths = Vec::with_capacity(capacity);
                    for path in receiver {
                        paths.push(path);
                    }
                    debug!("Collector drained {} paths", paths.len());
                    paths
                })
            })?;

        Ok(Self {
            sender,
            collector,
            capacity,
        })
    }

    /// Number of queue slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Paths sitting in the queue, not yet taken by the collector
    pub fn pending(&self) -> usize {
        self.sender.len()
    }
}

impl Aggregator for ChannelAggregator {
    fn append(&self, path: String) {
        // Only fails if the collector died; finalize reports that
        let _ = self.sender.send(path);
    }

    fn finalize(self) -> EnumerateResult<Vec<String>> {
        let Self {
            sender, collector, ..
        } = self;
        drop(sender);
        collector
            .join()
            .map_err(|_| EnumerateError::collector("collector thread panicked"))
    }
}
