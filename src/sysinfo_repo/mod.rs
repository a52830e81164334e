// Host metric source via sysinfo, with /proc readers on Linux

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
mod linux;

use crate::error::MonitorError;
use crate::models::{DiskCounters, MemoryReading};
use crate::source::MetricSource;
use std::sync::Mutex;
use sysinfo::System;
use tracing::instrument;

const BYTES_PER_MB: u64 = 1024 * 1024;
#[cfg(not(target_os = "linux"))]
const BYTES_PER_SECTOR: u64 = 512;

pub struct SysinfoRepo {
    sys: Mutex<System>,
    #[cfg(not(target_os = "linux"))]
    disks: Mutex<sysinfo::Disks>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        Self {
            sys: Mutex::new(sys),
            #[cfg(not(target_os = "linux"))]
            disks: Mutex::new(sysinfo::Disks::new_with_refreshed_list()),
        }
    }
}

impl MetricSource for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_memory"))]
    fn get_memory(&self) -> Result<MemoryReading, MonitorError> {
        let mut sys = self.sys.lock().map_err(|e| {
            MonitorError::unavailable("memory", format_args!("sysinfo lock poisoned: {}", e))
        })?;
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(MonitorError::unavailable(
                "memory",
                "sysinfo reported zero total memory",
            ));
        }
        Ok(MemoryReading {
            total_mb: total / BYTES_PER_MB,
            free_mb: sys.free_memory() / BYTES_PER_MB,
        })
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_cpu_load"))]
    fn get_cpu_load(&self) -> Result<f64, MonitorError> {
        #[cfg(target_os = "linux")]
        {
            let one = linux::read_load_average_one()
                .map_err(|e| MonitorError::unavailable("cpu", e))?;
            Ok(one * 100.0)
        }
        #[cfg(windows)]
        {
            Err(MonitorError::unavailable(
                "cpu",
                "load average is not reported on Windows",
            ))
        }
        #[cfg(not(any(target_os = "linux", windows)))]
        {
            let load = System::load_average();
            if !load.one.is_finite() {
                return Err(MonitorError::unavailable("cpu", "load average not finite"));
            }
            Ok(load.one * 100.0)
        }
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_disk_counters"))]
    fn get_disk_counters(&self) -> Result<DiskCounters, MonitorError> {
        #[cfg(target_os = "linux")]
        {
            linux::read_disk_sectors().map_err(|e| MonitorError::unavailable("disk", e))
        }
        #[cfg(not(target_os = "linux"))]
        {
            let mut disks = self.disks.lock().map_err(|e| {
                MonitorError::unavailable(
                    "disk",
                    format_args!("sysinfo disks lock poisoned: {}", e),
                )
            })?;
            disks.refresh(false);
            let (read_bytes, written_bytes) =
                disks.list().iter().fold((0u64, 0u64), |(r, w), d| {
                    let usage = d.usage();
                    (
                        r.saturating_add(usage.total_read_bytes),
                        w.saturating_add(usage.total_written_bytes),
                    )
                });
            Ok(DiskCounters {
                reads: read_bytes / BYTES_PER_SECTOR,
                writes: written_bytes / BYTES_PER_SECTOR,
            })
        }
    }
}
