// Snapshot store: single writer (the tick), any number of lock-free readers.
// Each commit swaps in a new immutable value, so a reader sees the whole old sample or the whole new one.

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::error::MonitorError;
use crate::models::{Sample, Snapshot, ThresholdUpdate, Thresholds};

#[derive(Debug, Default)]
struct Committed {
    generation: u64,
    sample: Sample,
}

pub struct Publisher {
    committed: ArcSwap<Committed>,
    thresholds: ArcSwap<Thresholds>,
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

impl Publisher {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            committed: ArcSwap::from_pointee(Committed::default()),
            thresholds: ArcSwap::from_pointee(thresholds),
        }
    }

    /// Replace the current sample. Older samples are dropped. Returns the new generation.
    pub fn commit(&self, sample: Sample) -> u64 {
        let prev = self.committed.rcu(|cur| Committed {
            generation: cur.generation + 1,
            sample,
        });
        prev.generation + 1
    }

    /// Copy of the current snapshot; all-zero sample with generation 0 before the first commit.
    pub fn current(&self) -> Snapshot {
        let committed = self.committed.load();
        Snapshot::new(committed.generation, committed.sample, self.thresholds())
    }

    /// Last committed sample, if any tick has completed.
    pub fn latest_sample(&self) -> Option<Sample> {
        let committed = self.committed.load();
        (committed.generation > 0).then_some(committed.sample)
    }

    pub fn thresholds(&self) -> Thresholds {
        **self.thresholds.load()
    }

    pub fn set_thresholds(&self, thresholds: Thresholds) {
        self.thresholds.store(Arc::new(thresholds));
    }

    /// Apply a partial update atomically. On error the current thresholds are left untouched.
    pub fn update_thresholds(&self, update: &ThresholdUpdate) -> Result<Thresholds, MonitorError> {
        let mut result = Err(MonitorError::invalid("thresholds", "update not applied"));
        self.thresholds.rcu(|cur| match cur.apply(update) {
            Ok(next) => {
                result = Ok(next);
                Arc::new(next)
            }
            Err(e) => {
                result = Err(e);
                Arc::clone(cur)
            }
        });
        result
    }
}
