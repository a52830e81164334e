// Raw source readings and the per-tick sample derived from them

use serde::{Deserialize, Serialize};

/// Memory totals as reported by the source, in MB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryReading {
    pub total_mb: u64,
    pub free_mb: u64,
}

/// Cumulative disk sector counters. May wrap or reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskCounters {
    pub reads: u64,
    pub writes: u64,
}

impl DiskCounters {
    pub fn combined(&self) -> u64 {
        self.reads.saturating_add(self.writes)
    }
}

/// One tick's worth of metrics. The all-zero default stands in before the first tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Milliseconds since the sampler was created (monotonic).
    pub timestamp_ms: u64,
    pub total_memory_mb: u64,
    pub free_memory_mb: u64,
    pub used_memory_mb: u64,
    /// 1-minute load average x 100; exceeds 100 under contention.
    pub cpu_load_percent: f64,
    pub disk_reads_cumulative: u64,
    pub disk_writes_cumulative: u64,
    /// Sectors read + written since the previous sample.
    pub disk_io_delta: u64,
}

impl Sample {
    /// Builds a sample from source readings; `prev` supplies the disk baseline.
    pub fn from_readings(
        timestamp_ms: u64,
        memory: MemoryReading,
        cpu_load_percent: f64,
        disk: DiskCounters,
        prev: Option<&Sample>,
    ) -> Self {
        let disk_io_delta = match prev {
            // a decrease means the counters were reset; report no activity rather than wrap
            Some(p) => disk.combined().saturating_sub(p.disk_combined()),
            None => 0,
        };
        Self {
            timestamp_ms,
            total_memory_mb: memory.total_mb,
            free_memory_mb: memory.free_mb,
            used_memory_mb: memory.total_mb.saturating_sub(memory.free_mb),
            cpu_load_percent,
            disk_reads_cumulative: disk.reads,
            disk_writes_cumulative: disk.writes,
            disk_io_delta,
        }
    }

    pub fn disk_combined(&self) -> u64 {
        self.disk_reads_cumulative
            .saturating_add(self.disk_writes_cumulative)
    }

    pub fn memory_usage_percent(&self) -> f64 {
        if self.total_memory_mb > 0 {
            (self.used_memory_mb as f64 / self.total_memory_mb as f64) * 100.0
        } else {
            0.0
        }
    }
}
