// Threshold evaluation: strict >, fixed order, purity

mod common;

use common::{sample_with, thresholds};
use sys_health::evaluator::evaluate;
use sys_health::models::MetricKind;

#[test]
fn test_single_memory_breach() {
    let t = thresholds(100.0, 80.0, 500.0);
    let events: Vec<_> = evaluate(sample_with(150, 50.0, 10), t).collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].metric_kind, MetricKind::Memory);
    assert_eq!(events[0].observed_value, 150.0);
    assert_eq!(events[0].threshold_value, 100.0);
    assert_eq!(events[0].timestamp_ms, 1_000);
}

#[test]
fn test_equal_to_threshold_is_not_a_breach() {
    let t = thresholds(100.0, 80.0, 500.0);
    assert_eq!(evaluate(sample_with(100, 80.0, 500), t).count(), 0);
}

#[test]
fn test_one_above_threshold_is_exactly_one_event_each() {
    let t = thresholds(100.0, 80.0, 500.0);
    let mem: Vec<_> = evaluate(sample_with(101, 80.0, 500), t).collect();
    assert_eq!(mem.len(), 1);
    assert_eq!(mem[0].metric_kind, MetricKind::Memory);

    let cpu: Vec<_> = evaluate(sample_with(100, 81.0, 500), t).collect();
    assert_eq!(cpu.len(), 1);
    assert_eq!(cpu[0].metric_kind, MetricKind::Cpu);

    let disk: Vec<_> = evaluate(sample_with(100, 80.0, 501), t).collect();
    assert_eq!(disk.len(), 1);
    assert_eq!(disk[0].metric_kind, MetricKind::DiskIo);
}

#[test]
fn test_order_is_memory_cpu_disk() {
    let t = thresholds(0.0, 0.0, 0.0);
    let kinds: Vec<_> = evaluate(sample_with(1, 1.0, 1), t)
        .map(|e| e.metric_kind)
        .collect();
    assert_eq!(
        kinds,
        vec![MetricKind::Memory, MetricKind::Cpu, MetricKind::DiskIo]
    );
}

#[test]
fn test_evaluate_is_pure() {
    let t = thresholds(10.0, 10.0, 10.0);
    let s = sample_with(20, 5.0, 30);
    let first: Vec<_> = evaluate(s, t).collect();
    let second: Vec<_> = evaluate(s, t).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_cpu_above_hundred_is_not_clamped() {
    let t = thresholds(1_000_000.0, 150.0, 1_000_000.0);
    let events: Vec<_> = evaluate(sample_with(1, 230.0, 0), t).collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].observed_value, 230.0);
}
