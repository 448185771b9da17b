//! Host resource detection
//!
//! Detection is best-effort: anything the OS cannot report is replaced by a
//! conservative fallback so that callers always receive usable metrics.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// CPU count assumed when the OS cannot report available parallelism
pub const FALLBACK_CPU_COUNT: usize = 1;

/// Total memory (GiB) assumed when the OS cannot report physical memory
pub const FALLBACK_TOTAL_MEM_GB: f64 = 8.0;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Snapshot of host capacity used for profile classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetrics {
    /// Logical CPU cores available to this process (at least 1)
    pub cpu_count: usize,
    /// Total physical memory in gibibytes
    pub total_mem_gb: f64,
}

impl ResourceMetrics {
    pub fn new(cpu_count: usize, total_mem_gb: f64) -> Self {
        Self {
            cpu_count,
            total_mem_gb,
        }
    }
}

/// Source of host resource metrics
///
/// Implementations must not fail; missing values are replaced with fallbacks.
pub trait MetricsProbe {
    fn detect(&self) -> ResourceMetrics;
}

/// Fixed metrics act as their own probe
impl MetricsProbe for ResourceMetrics {
    fn detect(&self) -> ResourceMetrics {
        *self
    }
}

/// Probe that queries the running host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl MetricsProbe for SystemProbe {
    fn detect(&self) -> ResourceMetrics {
        let metrics = ResourceMetrics {
            cpu_count: detect_cpu_count(),
            total_mem_gb: detect_total_mem_gb(),
        };
        debug!(
            "Detected {} CPUs and {:.1} GiB of memory",
            metrics.cpu_count, metrics.total_mem_gb
        );
        metrics
    }
}

fn detect_cpu_count() -> usize {
    match std::thread::available_parallelism() {
        Ok(n) => n.get(),
        Err(e) => {
            warn!("Failed to detect CPU count, assuming {FALLBACK_CPU_COUNT}: {e}");
            FALLBACK_CPU_COUNT
        }
    }
}

fn detect_total_mem_gb() -> f64 {
    use sysinfo::{MemoryRefreshKind, RefreshKind, System};

    if !sysinfo::IS_SUPPORTED_SYSTEM {
        return total_mem_gb_from(false, 0, None);
    }

    let system = System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
    );
    let cgroup_bytes = system.cgroup_limits().map(|limits| limits.total_memory);
    total_mem_gb_from(true, system.total_memory(), cgroup_bytes)
}

/// Memory visible to this process in GiB, or the fallback when unknown
///
/// A cgroup limit caps host memory so that CPU and memory are both measured
/// within the same container scope.
fn total_mem_gb_from(supported: bool, host_bytes: u64, cgroup_bytes: Option<u64>) -> f64 {
    if !supported {
        warn!("Memory detection unsupported on this platform, assuming {FALLBACK_TOTAL_MEM_GB} GiB");
        return FALLBACK_TOTAL_MEM_GB;
    }

    let bytes = match cgroup_bytes.filter(|&limit| limit > 0) {
        Some(limit) if host_bytes > 0 => limit.min(host_bytes),
        Some(limit) => limit,
        None => host_bytes,
    };

    bytes_to_gib(bytes).unwrap_or_else(|| {
        warn!("OS reported no physical memory, assuming {FALLBACK_TOTAL_MEM_GB} GiB");
        FALLBACK_TOTAL_MEM_GB
    })
}

/// Converts a byte count to GiB; zero means the query failed
fn bytes_to_gib(bytes: u64) -> Option<f64> {
    (bytes > 0).then(|| bytes as f64 / BYTES_PER_GIB)
}
