// Published point-in-time view: latest committed sample + live thresholds

use serde::Serialize;

use super::{Sample, Thresholds};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Number of commits so far; 0 means no tick has completed yet.
    pub generation: u64,
    pub sample: Sample,
    pub thresholds: Thresholds,
    pub memory_usage_percent: f64,
}

impl Snapshot {
    pub fn new(generation: u64, sample: Sample, thresholds: Thresholds) -> Self {
        Self {
            generation,
            memory_usage_percent: sample.memory_usage_percent(),
            sample,
            thresholds,
        }
    }

    pub fn is_initial(&self) -> bool {
        self.generation == 0
    }
}
