// Domain models: samples, thresholds, alerts, published snapshots

mod alert;
mod sample;
mod snapshot;
mod thresholds;

pub use alert::{AlertEvent, MetricKind};
pub use sample::{DiskCounters, MemoryReading, Sample};
pub use snapshot::Snapshot;
pub use thresholds::{
    DEFAULT_CPU_THRESHOLD_PERCENT, DEFAULT_DISK_IO_THRESHOLD, DEFAULT_MEM_THRESHOLD_MB,
    ThresholdUpdate, Thresholds,
};
