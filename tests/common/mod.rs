// Shared test helpers: a scripted metric source, a recording sink, polling

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use sys_health::alert_sink::AlertSink;
use sys_health::error::MonitorError;
use sys_health::models::*;
use sys_health::source::MetricSource;

/// Deterministic source. Call N (1-based, one per tick) reports disk counters of N * disk_step each.
pub struct FakeSource {
    memory: MemoryReading,
    cpu_load: f64,
    disk_step: u64,
    fail_calls: HashSet<u64>,
    tick_delay: Duration,
    calls: AtomicU64,
    completed: AtomicU64,
    in_flight: AtomicBool,
    active: AtomicU64,
    max_active: AtomicU64,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            memory: MemoryReading {
                total_mb: 8192,
                free_mb: 2048,
            },
            cpu_load: 25.0,
            disk_step: 100,
            fail_calls: HashSet::new(),
            tick_delay: Duration::ZERO,
            calls: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            in_flight: AtomicBool::new(false),
            active: AtomicU64::new(0),
            max_active: AtomicU64::new(0),
        }
    }

    pub fn with_memory(mut self, total_mb: u64, free_mb: u64) -> Self {
        self.memory = MemoryReading { total_mb, free_mb };
        self
    }

    pub fn with_cpu_load(mut self, cpu_load: f64) -> Self {
        self.cpu_load = cpu_load;
        self
    }

    pub fn with_disk_step(mut self, disk_step: u64) -> Self {
        self.disk_step = disk_step;
        self
    }

    /// Make the given 1-based calls fail with SourceUnavailable.
    pub fn failing_on(mut self, calls: &[u64]) -> Self {
        self.fail_calls = calls.iter().copied().collect();
        self
    }

    /// Block inside each query round for this long.
    pub fn with_tick_delay(mut self, delay: Duration) -> Self {
        self.tick_delay = delay;
        self
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of query rounds that were ever running at the same time.
    pub fn max_concurrent(&self) -> u64 {
        self.max_active.load(Ordering::SeqCst)
    }

    fn finish_round(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

impl MetricSource for FakeSource {
    fn get_memory(&self) -> Result<MemoryReading, MonitorError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);
        self.in_flight.store(true, Ordering::SeqCst);
        if !self.tick_delay.is_zero() {
            std::thread::sleep(self.tick_delay);
        }
        if self.fail_calls.contains(&n) {
            self.finish_round();
            return Err(MonitorError::unavailable("memory", "scripted failure"));
        }
        Ok(self.memory)
    }

    fn get_cpu_load(&self) -> Result<f64, MonitorError> {
        Ok(self.cpu_load)
    }

    fn get_disk_counters(&self) -> Result<DiskCounters, MonitorError> {
        let n = self.calls.load(Ordering::SeqCst);
        let counters = DiskCounters {
            reads: n * self.disk_step,
            writes: n * self.disk_step,
        };
        self.finish_round();
        Ok(counters)
    }
}

/// Collects every alert it is handed.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AlertEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<AlertEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingSink {
    fn notify(&self, event: &AlertEvent) {
        self.events.lock().unwrap().push(*event);
    }
}

pub fn sample_with(used_memory_mb: u64, cpu_load_percent: f64, disk_io_delta: u64) -> Sample {
    Sample {
        timestamp_ms: 1_000,
        total_memory_mb: used_memory_mb * 2,
        free_memory_mb: used_memory_mb,
        used_memory_mb,
        cpu_load_percent,
        disk_reads_cumulative: 0,
        disk_writes_cumulative: 0,
        disk_io_delta,
    }
}

pub fn thresholds(mem: f64, cpu: f64, disk: f64) -> Thresholds {
    Thresholds::new(mem, cpu, disk).expect("valid thresholds")
}

/// Poll `cond` until it holds; panics after `limit`.
pub async fn wait_until(limit: Duration, what: &str, cond: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + limit;
    while !cond() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for {}",
            what
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
