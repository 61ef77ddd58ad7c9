//! Process-level default metrics.
//!
//! CPU time, memory and file descriptors come from `/proc/self` on Linux.
//! Elsewhere the same families are emitted with value 0 so the scrape shape
//! does not depend on the platform. Async runtime stats come from the current
//! tokio handle when one is available.

use std::fmt::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use super::metrics::Collector;

/// Used when the kernel tick rate cannot be queried.
const FALLBACK_CLOCK_TICKS_PER_SEC: f64 = 100.0;

/// Kernel clock ticks per second, the unit of the CPU fields in `/proc/self/stat`.
#[cfg(target_os = "linux")]
pub fn clock_ticks_per_sec() -> f64 {
    // SAFETY: sysconf has no preconditions and only reads a constant.
    let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if ticks > 0 {
        ticks as f64
    } else {
        FALLBACK_CLOCK_TICKS_PER_SEC
    }
}

#[cfg(not(target_os = "linux"))]
pub fn clock_ticks_per_sec() -> f64 {
    FALLBACK_CLOCK_TICKS_PER_SEC
}

const FAMILIES: [(&str, &str, &str); 10] = [
    ("process_cpu_user_seconds_total", "counter", "Total user CPU time spent in seconds."),
    ("process_cpu_system_seconds_total", "counter", "Total system CPU time spent in seconds."),
    ("process_cpu_seconds_total", "counter", "Total user and system CPU time spent in seconds."),
    ("process_start_time_seconds", "gauge", "Start time of the process since unix epoch in seconds."),
    ("process_resident_memory_bytes", "gauge", "Resident memory size in bytes."),
    ("process_virtual_memory_bytes", "gauge", "Virtual memory size in bytes."),
    ("process_open_fds", "gauge", "Number of open file descriptors."),
    ("process_max_fds", "gauge", "Maximum number of open file descriptors."),
    ("tokio_runtime_workers", "gauge", "Number of worker threads used by the async runtime."),
    ("tokio_runtime_alive_tasks", "gauge", "Number of alive tasks in the async runtime."),
];

/// One reading of the process stats. `None` means unavailable here.
#[derive(Debug, Clone, Default)]
pub struct ProcessSample {
    pub cpu_user_secs: Option<f64>,
    pub cpu_system_secs: Option<f64>,
    pub resident_bytes: Option<u64>,
    pub virtual_bytes: Option<u64>,
    pub open_fds: Option<u64>,
    pub max_fds: Option<u64>,
    pub runtime_workers: Option<usize>,
    pub runtime_alive_tasks: Option<usize>,
}

impl ProcessSample {
    pub fn read() -> Self {
        let mut s = Self::default();
        read_proc(&mut s);
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let m = handle.metrics();
            s.runtime_workers = Some(m.num_workers());
            s.runtime_alive_tasks = Some(m.num_alive_tasks());
        }
        s
    }
}

#[cfg(target_os = "linux")]
fn read_proc(s: &mut ProcessSample) {
    use std::fs;

    if let Ok(stat) = fs::read_to_string("/proc/self/stat") {
        // The command name may contain spaces; fields are counted after ')'.
        if let Some((_, rest)) = stat.rsplit_once(')') {
            let fields: Vec<&str> = rest.split_whitespace().collect();
            let hz = clock_ticks_per_sec();
            let ticks = |i: usize| fields.get(i).and_then(|v| v.parse::<f64>().ok());
            s.cpu_user_secs = ticks(11).map(|t| t / hz);
            s.cpu_system_secs = ticks(12).map(|t| t / hz);
        }
    }

    if let Ok(status) = fs::read_to_string("/proc/self/status") {
        s.resident_bytes = status_kib(&status, "VmRSS:").map(|kib| kib * 1024);
        s.virtual_bytes = status_kib(&status, "VmSize:").map(|kib| kib * 1024);
    }

    if let Ok(dir) = fs::read_dir("/proc/self/fd") {
        s.open_fds = Some(dir.count() as u64);
    }

    if let Ok(limits) = fs::read_to_string("/proc/self/limits") {
        s.max_fds = limits
            .lines()
            .find(|l| l.starts_with("Max open files"))
            .and_then(|l| l.split_whitespace().nth(3))
            .and_then(|v| v.parse().ok());
    }
}

#[cfg(not(target_os = "linux"))]
fn read_proc(_s: &mut ProcessSample) {}

#[cfg(target_os = "linux")]
fn status_kib(status: &str, key: &str) -> Option<u64> {
    status
        .lines()
        .find(|l| l.starts_with(key))
        .and_then(|l| l.split_whitespace().nth(1))
        .and_then(|v| v.parse().ok())
}

/// Default collector for process and runtime stats.
pub struct ProcessCollector {
    start_time_secs: f64,
}

impl ProcessCollector {
    pub fn new() -> Self {
        let start_time_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64().floor())
            .unwrap_or_default();
        Self { start_time_secs }
    }
}

impl Default for ProcessCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for ProcessCollector {
    fn names(&self) -> Vec<&'static str> {
        FAMILIES.iter().map(|(n, _, _)| *n).collect()
    }

    fn collect(&self, out: &mut String) {
        let s = ProcessSample::read();
        let user = s.cpu_user_secs.unwrap_or(0.0);
        let system = s.cpu_system_secs.unwrap_or(0.0);
        let values: [f64; 10] = [
            user,
            system,
            user + system,
            self.start_time_secs,
            s.resident_bytes.unwrap_or(0) as f64,
            s.virtual_bytes.unwrap_or(0) as f64,
            s.open_fds.unwrap_or(0) as f64,
            s.max_fds.unwrap_or(0) as f64,
            s.runtime_workers.unwrap_or(0) as f64,
            s.runtime_alive_tasks.unwrap_or(0) as f64,
        ];

        for ((name, kind, help), v) in FAMILIES.iter().zip(values) {
            let _ = writeln!(out, "# HELP {} {}", name, help);
            let _ = writeln!(out, "# TYPE {} {}", name, kind);
            let _ = writeln!(out, "{} {}", name, v);
        }
    }
}
