// Periodic sampling loop (Stopped -> Running -> Stopped).
// Each tick runs on the blocking pool: sample, evaluate, notify the sink, commit to the publisher.

use crate::alert_sink::AlertSink;
use crate::error::MonitorError;
use crate::evaluator::evaluate;
use crate::models::{MetricKind, Sample};
use crate::publisher::Publisher;
use crate::sampler::{SampleOutcome, Sampler};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, Interval, MissedTickBehavior, interval, interval_at};
use tracing::Instrument;

pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_STATS_LOG_INTERVAL_SECS: u64 = 60;

/// Scheduler timing and logging config.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    pub sample_interval_ms: u64,
    /// How often to log tick counters at INFO (real seconds).
    pub stats_log_interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            stats_log_interval_secs: DEFAULT_STATS_LOG_INTERVAL_SECS,
        }
    }
}

/// What one tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Baseline for the next tick's disk delta (the previous one again if the source failed).
    pub sample: Option<Sample>,
    pub alerts_raised: usize,
    pub generation: Option<u64>,
    pub source_error: Option<MonitorError>,
}

/// The work of a single tick, independent of any timer.
pub struct TickPipeline {
    sampler: Sampler,
    publisher: Arc<Publisher>,
    sink: Arc<dyn AlertSink>,
}

impl TickPipeline {
    pub fn new(sampler: Sampler, publisher: Arc<Publisher>, sink: Arc<dyn AlertSink>) -> Self {
        Self {
            sampler,
            publisher,
            sink,
        }
    }

    /// Stale data is neither re-evaluated nor re-committed; the last good snapshot stays current.
    pub fn run_tick(&self, prev: Option<&Sample>) -> TickReport {
        match self.sampler.sample(prev) {
            SampleOutcome::Fresh(sample) => {
                let thresholds = self.publisher.thresholds();
                let mut alerts_raised = 0;
                let mut breached = [false; MetricKind::ALL.len()];
                for event in evaluate(sample, thresholds) {
                    self.sink.notify(&event);
                    breached[event.metric_kind as usize] = true;
                    alerts_raised += 1;
                }
                for kind in MetricKind::ALL {
                    if !breached[kind as usize] {
                        tracing::debug!(metric = kind.as_str(), "Within threshold");
                    }
                }
                let generation = self.publisher.commit(sample);
                TickReport {
                    sample: Some(sample),
                    alerts_raised,
                    generation: Some(generation),
                    source_error: None,
                }
            }
            SampleOutcome::Stale { previous, error } => TickReport {
                sample: previous,
                alerts_raised: 0,
                generation: None,
                source_error: Some(error),
            },
        }
    }
}

/// Tick counters, shared with the running loop.
#[derive(Debug, Default)]
struct TickStats {
    ticks_total: AtomicU64,
    ticks_degraded: AtomicU64,
    ticks_failed: AtomicU64,
    alerts_total: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickCounts {
    /// Ticks that ran to completion (fresh or stale).
    pub ticks_total: u64,
    /// Ticks where the metric source was unavailable.
    pub ticks_degraded: u64,
    /// Ticks that panicked.
    pub ticks_failed: u64,
    pub alerts_total: u64,
}

struct RunningLoop {
    // Taken once the stop signal is sent; the loop stays registered until it has joined.
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

pub struct Scheduler {
    pipeline: Arc<TickPipeline>,
    config: SchedulerConfig,
    stats: Arc<TickStats>,
    // Held across the drain in stop(), so start() cannot overlap a loop that is still finishing.
    running: Mutex<Option<RunningLoop>>,
}

impl Scheduler {
    pub fn new(pipeline: TickPipeline, config: SchedulerConfig) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            config,
            stats: Arc::new(TickStats::default()),
            running: Mutex::new(None),
        }
    }

    /// Begin ticking. The first tick fires immediately, then every `sample_interval_ms`.
    pub async fn start(&self) -> Result<(), MonitorError> {
        let mut running = self.running.lock().await;
        if running.is_some() {
            return Err(MonitorError::AlreadyRunning);
        }
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = spawn_loop(
            self.pipeline.clone(),
            self.config,
            self.stats.clone(),
            shutdown_rx,
        );
        *running = Some(RunningLoop {
            shutdown_tx: Some(shutdown_tx),
            handle,
        });
        tracing::info!(
            sample_interval_ms = self.config.sample_interval_ms,
            "Monitor started"
        );
        Ok(())
    }

    /// Stop ticking. Waits for an in-flight tick to finish; no tick fires after this returns.
    ///
    /// Cancel-safe: if this future is dropped before the loop has joined, the scheduler
    /// still reports running and a later `stop()` finishes the drain.
    pub async fn stop(&self) -> Result<(), MonitorError> {
        let mut running = self.running.lock().await;
        let current = running.as_mut().ok_or(MonitorError::NotRunning)?;
        if let Some(shutdown_tx) = current.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        let joined = (&mut current.handle).await;
        *running = None;
        if let Err(e) = joined {
            tracing::warn!(error = %e, operation = "stop", "Scheduler loop ended abnormally");
        }
        tracing::info!("Monitor stopped");
        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        self.running.lock().await.is_some()
    }

    pub fn tick_counts(&self) -> TickCounts {
        TickCounts {
            ticks_total: self.stats.ticks_total.load(Ordering::Relaxed),
            ticks_degraded: self.stats.ticks_degraded.load(Ordering::Relaxed),
            ticks_failed: self.stats.ticks_failed.load(Ordering::Relaxed),
            alerts_total: self.stats.alerts_total.load(Ordering::Relaxed),
        }
    }
}

/// First stats line comes one full period after start, not at start with every counter at zero.
fn stats_log_interval(stats_log_interval_secs: u64) -> Interval {
    let period = Duration::from_secs(stats_log_interval_secs.max(1));
    let mut stats_log_tick = interval_at(Instant::now() + period, period);
    stats_log_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    stats_log_tick
}

fn spawn_loop(
    pipeline: Arc<TickPipeline>,
    config: SchedulerConfig,
    stats: Arc<TickStats>,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> JoinHandle<()> {
    let SchedulerConfig {
        sample_interval_ms,
        stats_log_interval_secs,
    } = config;

    let scheduler_span = tracing::span!(tracing::Level::DEBUG, "scheduler", sample_interval_ms);

    tokio::spawn(
        async move {
            let mut tick = interval(Duration::from_millis(sample_interval_ms.max(1)));
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut stats_log_tick = stats_log_interval(stats_log_interval_secs);

            // Disk delta baseline; reset on every start so the first sample reports zero.
            let mut prev: Option<Sample> = None;
            let mut degraded = false;

            loop {
                tokio::select! {
                    // shutdown wins over a tick that is due at the same time
                    biased;
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Scheduler shutting down");
                        break;
                    }
                    _ = tick.tick() => {
                        let tick_pipeline = pipeline.clone();
                        let baseline = prev;
                        let result = tokio::task::spawn_blocking(move || {
                            tick_pipeline.run_tick(baseline.as_ref())
                        })
                        .await;

                        let report = match result {
                            Ok(report) => report,
                            Err(e) => {
                                stats.ticks_failed.fetch_add(1, Ordering::Relaxed);
                                tracing::warn!(
                                    error = %e,
                                    operation = "tick",
                                    "Tick failed; next tick stays scheduled"
                                );
                                continue;
                            }
                        };

                        stats.ticks_total.fetch_add(1, Ordering::Relaxed);
                        stats
                            .alerts_total
                            .fetch_add(report.alerts_raised as u64, Ordering::Relaxed);
                        prev = report.sample;

                        match report.source_error {
                            Some(e) => {
                                stats.ticks_degraded.fetch_add(1, Ordering::Relaxed);
                                if degraded {
                                    tracing::debug!(
                                        error = %e,
                                        operation = "sample",
                                        "Metric source still unavailable"
                                    );
                                } else {
                                    tracing::warn!(
                                        error = %e,
                                        operation = "sample",
                                        "Metric source unavailable; keeping last snapshot"
                                    );
                                    degraded = true;
                                }
                            }
                            None => {
                                if degraded {
                                    tracing::info!(operation = "sample", "Metric source recovered");
                                    degraded = false;
                                }
                                if let Some(sample) = report.sample {
                                    tracing::debug!(
                                        generation = ?report.generation,
                                        used_memory_mb = sample.used_memory_mb,
                                        cpu_load_percent = sample.cpu_load_percent,
                                        disk_io_delta = sample.disk_io_delta,
                                        alerts = report.alerts_raised,
                                        "Sample committed"
                                    );
                                }
                            }
                        }
                    }
                    _ = stats_log_tick.tick() => {
                        tracing::info!(
                            ticks_total = stats.ticks_total.load(Ordering::Relaxed),
                            ticks_degraded = stats.ticks_degraded.load(Ordering::Relaxed),
                            ticks_failed = stats.ticks_failed.load(Ordering::Relaxed),
                            alerts_total = stats.alerts_total.load(Ordering::Relaxed),
                            "monitor stats"
                        );
                    }
                }
            }
        }
        .instrument(scheduler_span),
    )
}
