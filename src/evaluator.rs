// Threshold evaluation: pure, strict greater-than, fixed memory -> CPU -> disk order.

use crate::models::{AlertEvent, MetricKind, Sample, Thresholds};

/// Lazily yields one AlertEvent per breached metric. A value equal to its threshold is not a breach.
pub fn evaluate(sample: Sample, thresholds: Thresholds) -> impl Iterator<Item = AlertEvent> {
    MetricKind::ALL.into_iter().filter_map(move |kind| {
        let (observed_value, threshold_value) = observed_and_threshold(kind, &sample, &thresholds);
        (observed_value > threshold_value).then_some(AlertEvent {
            metric_kind: kind,
            observed_value,
            threshold_value,
            timestamp_ms: sample.timestamp_ms,
        })
    })
}

fn observed_and_threshold(
    kind: MetricKind,
    sample: &Sample,
    thresholds: &Thresholds,
) -> (f64, f64) {
    match kind {
        MetricKind::Memory => (sample.used_memory_mb as f64, thresholds.mem_threshold_mb()),
        MetricKind::Cpu => (sample.cpu_load_percent, thresholds.cpu_threshold_percent()),
        MetricKind::DiskIo => (sample.disk_io_delta as f64, thresholds.disk_io_threshold()),
    }
}
