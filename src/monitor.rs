// Monitor: one publisher + one scheduler, constructed once and shared by the host process.

use std::sync::Arc;

use crate::alert_sink::AlertSink;
use crate::error::MonitorError;
use crate::models::{Snapshot, ThresholdUpdate, Thresholds};
use crate::publisher::Publisher;
use crate::report;
use crate::sampler::Sampler;
use crate::scheduler::{Scheduler, SchedulerConfig, TickCounts, TickPipeline};
use crate::source::MetricSource;

pub struct Monitor {
    publisher: Arc<Publisher>,
    scheduler: Scheduler,
}

impl Monitor {
    pub fn new(
        source: Arc<dyn MetricSource>,
        sink: Arc<dyn AlertSink>,
        thresholds: Thresholds,
        config: SchedulerConfig,
    ) -> Self {
        let publisher = Arc::new(Publisher::new(thresholds));
        let pipeline = TickPipeline::new(Sampler::new(source), publisher.clone(), sink);
        Self {
            publisher,
            scheduler: Scheduler::new(pipeline, config),
        }
    }

    pub async fn start(&self) -> Result<(), MonitorError> {
        self.scheduler.start().await
    }

    pub async fn stop(&self) -> Result<(), MonitorError> {
        self.scheduler.stop().await
    }

    pub async fn is_running(&self) -> bool {
        self.scheduler.is_running().await
    }

    /// Rendered status text for the current snapshot. Read-only; safe to call from any thread.
    pub fn status(&self) -> String {
        report::render(&self.publisher.current())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.publisher.current()
    }

    pub fn thresholds(&self) -> Thresholds {
        self.publisher.thresholds()
    }

    /// Runtime reconfiguration. Rejected updates leave the active thresholds unchanged.
    pub fn update_thresholds(&self, update: &ThresholdUpdate) -> Result<Thresholds, MonitorError> {
        match self.publisher.update_thresholds(update) {
            Ok(thresholds) => {
                tracing::info!(
                    mem_threshold_mb = thresholds.mem_threshold_mb(),
                    cpu_threshold_percent = thresholds.cpu_threshold_percent(),
                    disk_io_threshold = thresholds.disk_io_threshold(),
                    "Thresholds updated"
                );
                Ok(thresholds)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    operation = "update_thresholds",
                    "Threshold update rejected"
                );
                Err(e)
            }
        }
    }

    pub fn tick_counts(&self) -> TickCounts {
        self.scheduler.tick_counts()
    }

    pub fn publisher(&self) -> &Arc<Publisher> {
        &self.publisher
    }
}
