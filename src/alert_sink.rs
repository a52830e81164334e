// Alert sinks: where breaches go, called synchronously from the tick

use crate::models::AlertEvent;

/// Receives one event at a time. Must not block significantly; the tick does not retry.
pub trait AlertSink: Send + Sync {
    fn notify(&self, event: &AlertEvent);
}

/// Default sink: one WARN line per breach.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn notify(&self, event: &AlertEvent) {
        tracing::warn!(
            metric = %event.metric_kind,
            observed = event.observed_value,
            threshold = event.threshold_value,
            timestamp_ms = event.timestamp_ms,
            "Alert: {}",
            event
        );
    }
}

impl<F> AlertSink for F
where
    F: Fn(&AlertEvent) + Send + Sync,
{
    fn notify(&self, event: &AlertEvent) {
        self(event)
    }
}
