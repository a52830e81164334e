// Alert thresholds and validated updates

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

pub const DEFAULT_MEM_THRESHOLD_MB: f64 = 100.0;
pub const DEFAULT_CPU_THRESHOLD_PERCENT: f64 = 70.0;
pub const DEFAULT_DISK_IO_THRESHOLD: f64 = 500.0;

/// Active thresholds. Only constructible through validation, so every field is finite and >= 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    mem_threshold_mb: f64,
    cpu_threshold_percent: f64,
    disk_io_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            mem_threshold_mb: DEFAULT_MEM_THRESHOLD_MB,
            cpu_threshold_percent: DEFAULT_CPU_THRESHOLD_PERCENT,
            disk_io_threshold: DEFAULT_DISK_IO_THRESHOLD,
        }
    }
}

impl Thresholds {
    pub fn new(
        mem_threshold_mb: f64,
        cpu_threshold_percent: f64,
        disk_io_threshold: f64,
    ) -> Result<Self, MonitorError> {
        Ok(Self {
            mem_threshold_mb: validate("mem_threshold_mb", mem_threshold_mb)?,
            cpu_threshold_percent: validate("cpu_threshold_percent", cpu_threshold_percent)?,
            disk_io_threshold: validate("disk_io_threshold", disk_io_threshold)?,
        })
    }

    pub fn mem_threshold_mb(&self) -> f64 {
        self.mem_threshold_mb
    }

    pub fn cpu_threshold_percent(&self) -> f64 {
        self.cpu_threshold_percent
    }

    pub fn disk_io_threshold(&self) -> f64 {
        self.disk_io_threshold
    }

    /// Returns a copy with the given fields replaced. All-or-nothing: one bad field rejects the update.
    pub fn apply(&self, update: &ThresholdUpdate) -> Result<Self, MonitorError> {
        Self::new(
            update.mem_threshold_mb.unwrap_or(self.mem_threshold_mb),
            update
                .cpu_threshold_percent
                .unwrap_or(self.cpu_threshold_percent),
            update.disk_io_threshold.unwrap_or(self.disk_io_threshold),
        )
    }
}

/// Partial threshold change (runtime reconfiguration). Missing fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdUpdate {
    pub mem_threshold_mb: Option<f64>,
    pub cpu_threshold_percent: Option<f64>,
    pub disk_io_threshold: Option<f64>,
}

fn validate(field: &'static str, value: f64) -> Result<f64, MonitorError> {
    if !value.is_finite() {
        return Err(MonitorError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(MonitorError::invalid(
            field,
            format_args!("must be >= 0, got {}", value),
        ));
    }
    Ok(value)
}
