// Plain-text status report

use std::fmt::Write;

use crate::models::Snapshot;

/// Render a snapshot in fixed field order. Never fails; before the first tick every metric reads zero.
pub fn render(snapshot: &Snapshot) -> String {
    let sample = &snapshot.sample;
    let thresholds = &snapshot.thresholds;
    let mut out = String::with_capacity(512);

    // writing to a String cannot fail
    let _ = writeln!(out, "=== Real-Time System Health Metrics ===");
    let _ = writeln!(out, "Samples collected: {}", snapshot.generation);
    let _ = writeln!(out);
    let _ = writeln!(out, "Total Memory: {} MB", sample.total_memory_mb);
    let _ = writeln!(out, "Free Memory:  {} MB", sample.free_memory_mb);
    let _ = writeln!(
        out,
        "Memory Used:  {} MB ({:.1}%)",
        sample.used_memory_mb, snapshot.memory_usage_percent
    );
    let _ = writeln!(out, "CPU Load:     {:.2} %", sample.cpu_load_percent);
    let _ = writeln!(out, "Disk I/O:     {} sectors since last sample", sample.disk_io_delta);
    let _ = writeln!(out, "Disk Reads:   {} sectors", sample.disk_reads_cumulative);
    let _ = writeln!(out, "Disk Writes:  {} sectors", sample.disk_writes_cumulative);
    let _ = writeln!(out);
    let _ = writeln!(out, "Thresholds:");
    let _ = writeln!(out, "  Memory:   {} MB", thresholds.mem_threshold_mb());
    let _ = writeln!(out, "  CPU:      {} %", thresholds.cpu_threshold_percent());
    let _ = writeln!(out, "  Disk I/O: {} sectors", thresholds.disk_io_threshold());
    out
}
