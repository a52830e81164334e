// Linux-specific readers: /proc/loadavg and /proc/diskstats.

use crate::models::DiskCounters;
use std::io;
use std::path::Path;

/// Read the 1-minute load average from /proc/loadavg.
pub(super) fn read_load_average_one() -> io::Result<f64> {
    let content = std::fs::read_to_string("/proc/loadavg")?;
    parse_loadavg(&content).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            "unparseable /proc/loadavg contents",
        )
    })
}

pub(super) fn parse_loadavg(content: &str) -> Option<f64> {
    content
        .split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

const SYS_BLOCK: &str = "/sys/block";

/// Sum of sectors read / written across whole-disk devices in /proc/diskstats.
///
/// A device is a whole disk when /sys/block lists it; partitions only appear nested under
/// their parent there. Without sysfs, names that look like partitions are skipped instead.
pub(super) fn read_disk_sectors() -> io::Result<DiskCounters> {
    let content = std::fs::read_to_string("/proc/diskstats")?;
    let sys_block = Path::new(SYS_BLOCK);
    let has_sysfs = sys_block.is_dir();
    parse_diskstats(&content, |name| {
        if has_sysfs {
            sys_block.join(name).exists()
        } else {
            !looks_like_partition(name)
        }
    })
    .ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "no disk devices in /proc/diskstats",
        )
    })
}

/// Columns: major minor name reads merged sectors_read ms writes merged sectors_written ...
/// Virtual devices and anything `is_block_device` rejects are skipped so sectors are not
/// counted twice.
pub(super) fn parse_diskstats(
    content: &str,
    is_block_device: impl Fn(&str) -> bool,
) -> Option<DiskCounters> {
    let mut found = false;
    let mut counters = DiskCounters::default();
    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 10 || is_virtual(parts[2]) || !is_block_device(parts[2]) {
            continue;
        }
        let (Ok(read), Ok(written)) = (parts[5].parse::<u64>(), parts[9].parse::<u64>()) else {
            continue;
        };
        found = true;
        counters.reads = counters.reads.saturating_add(read);
        counters.writes = counters.writes.saturating_add(written);
    }
    found.then_some(counters)
}

fn is_virtual(name: &str) -> bool {
    const VIRTUAL: [&str; 8] = ["loop", "ram", "dm-", "md", "zram", "sr", "fd", "nbd"];
    VIRTUAL.iter().any(|p| name.starts_with(p))
}

fn looks_like_partition(name: &str) -> bool {
    // nvme0n1 / mmcblk0 are disks; nvme0n1p1 / mmcblk0p1 are partitions
    if name.starts_with("nvme") || name.starts_with("mmcblk") {
        return name.contains('p');
    }
    if ["sd", "hd", "vd", "xvd"].iter().any(|p| name.starts_with(p)) {
        return name.ends_with(|c: char| c.is_ascii_digit());
    }
    false
}
