// Turns raw source readings into a Sample, deriving used memory and the disk I/O delta.

use crate::error::MonitorError;
use crate::models::Sample;
use crate::source::MetricSource;
use std::sync::Arc;
use std::time::Instant;

/// Result of one sampling attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    Fresh(Sample),
    /// A source query failed; `previous` is handed back unchanged (None before any good sample).
    Stale {
        previous: Option<Sample>,
        error: MonitorError,
    },
}

impl SampleOutcome {
    /// The sample that should be treated as current after this attempt.
    pub fn sample(&self) -> Option<&Sample> {
        match self {
            SampleOutcome::Fresh(s) => Some(s),
            SampleOutcome::Stale { previous, .. } => previous.as_ref(),
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, SampleOutcome::Fresh(_))
    }
}

pub struct Sampler {
    source: Arc<dyn MetricSource>,
    epoch: Instant,
}

impl Sampler {
    pub fn new(source: Arc<dyn MetricSource>) -> Self {
        Self {
            source,
            epoch: Instant::now(),
        }
    }

    /// Query the source once. Never logs; the caller decides what to do with a stale outcome.
    pub fn sample(&self, prev: Option<&Sample>) -> SampleOutcome {
        match self.read(prev) {
            Ok(sample) => SampleOutcome::Fresh(sample),
            Err(error) => SampleOutcome::Stale {
                previous: prev.copied(),
                error,
            },
        }
    }

    fn read(&self, prev: Option<&Sample>) -> Result<Sample, MonitorError> {
        let memory = self.source.get_memory()?;
        let cpu_load_percent = self.source.get_cpu_load()?;
        let disk = self.source.get_disk_counters()?;
        Ok(Sample::from_readings(
            self.elapsed_ms(),
            memory,
            cpu_load_percent,
            disk,
            prev,
        ))
    }

    fn elapsed_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis().min(u64::MAX as u128) as u64
    }
}
