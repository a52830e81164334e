// Alert events raised when a metric breaches its threshold

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Memory,
    Cpu,
    DiskIo,
}

impl MetricKind {
    /// Evaluation order.
    pub const ALL: [MetricKind; 3] = [MetricKind::Memory, MetricKind::Cpu, MetricKind::DiskIo];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Memory => "memory",
            MetricKind::Cpu => "cpu",
            MetricKind::DiskIo => "disk_io",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::Memory => "MB",
            MetricKind::Cpu => "%",
            MetricKind::DiskIo => "sectors",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub metric_kind: MetricKind,
    pub observed_value: f64,
    pub threshold_value: f64,
    /// Timestamp of the sample that breached.
    pub timestamp_ms: u64,
}

impl fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.metric_kind.unit();
        write!(
            f,
            "{} exceeded threshold ({} {} > {} {})",
            self.metric_kind, self.observed_value, unit, self.threshold_value, unit
        )
    }
}
