//! Resource usage line printed at the end of the summary

use bytesize::ByteSize;
use std::time::{Duration, Instant};

/// Source of the resource usage line. The reporter appends whatever it
/// returns verbatim.
pub trait ResourceUsage {
    fn summary(&self) -> String;
}

/// Elapsed wall time and peak memory of the current process.
pub struct ProcessUsage {
    started: Instant,
}

impl ProcessUsage {
    /// Start measuring from now.
    pub fn start() -> Self {
        ProcessUsage {
            started: Instant::now(),
        }
    }
}

impl ResourceUsage for ProcessUsage {
    fn summary(&self) -> String {
        let elapsed = to_millis(self.started.elapsed());
        let time = humantime::format_duration(elapsed);
        match peak_memory() {
            Some(bytes) => format!("Time: {}, Memory: {}", time, ByteSize::b(bytes)),
            None => format!("Time: {}", time),
        }
    }
}

/// Round `duration` down to whole milliseconds for display.
fn to_millis(duration: Duration) -> Duration {
    Duration::from_millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

/// A fixed resource usage line.
pub struct StaticUsage(pub String);

impl ResourceUsage for StaticUsage {
    fn summary(&self) -> String {
        self.0.clone()
    }
}

#[cfg(target_os = "linux")]
fn peak_memory() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    parse_peak_memory(&status)
}

#[cfg(not(target_os = "linux"))]
fn peak_memory() -> Option<u64> {
    None
}

/// Extract the peak resident set size, in bytes, from the contents of
/// `/proc/<pid>/status`.
pub fn parse_peak_memory(status: &str) -> Option<u64> {
    let line = status.lines().find(|l| l.starts_with("VmHWM:"))?;
    let mut fields = line["VmHWM:".len()..].split_whitespace();
    let value: u64 = fields.next()?.parse().ok()?;
    match fields.next() {
        Some("kB") | None => Some(value * 1024),
        Some(_) => None,
    }
}
