// Metric source seam: synchronous queries returning raw counters

use crate::error::MonitorError;
use crate::models::{DiskCounters, MemoryReading};

/// Raw metric queries. Implementations may block briefly; the scheduler calls them off the async runtime.
pub trait MetricSource: Send + Sync {
    fn get_memory(&self) -> Result<MemoryReading, MonitorError>;

    /// Load figure scaled to percent (1-minute load average x 100).
    fn get_cpu_load(&self) -> Result<f64, MonitorError>;

    fn get_disk_counters(&self) -> Result<DiskCounters, MonitorError>;
}
