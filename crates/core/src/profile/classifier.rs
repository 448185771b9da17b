//! Maps host metrics onto a profile
//!
//! Either dimension being scarce demotes the host: a machine with many cores
//! but little memory is still treated as low capacity, since concurrent
//! parsing and batching exhaust memory first.

use super::ProfileName;
use crate::metrics::ResourceMetrics;

/// Hosts at or below this many cores are low
pub const LOW_MAX_CPU_COUNT: usize = 4;
/// Hosts at or below this much memory (GiB) are low
pub const LOW_MAX_TOTAL_MEM_GB: f64 = 8.0;
/// Hosts at or below this many cores are at most medium
pub const MEDIUM_MAX_CPU_COUNT: usize = 8;
/// Hosts at or below this much memory (GiB) are at most medium
pub const MEDIUM_MAX_TOTAL_MEM_GB: f64 = 16.0;

/// Classifies host metrics into a profile
///
/// Boundary values belong to the lower profile.
pub fn classify(metrics: &ResourceMetrics) -> ProfileName {
    let ResourceMetrics {
        cpu_count,
        total_mem_gb,
    } = *metrics;

    if cpu_count <= LOW_MAX_CPU_COUNT || total_mem_gb <= LOW_MAX_TOTAL_MEM_GB {
        return ProfileName::Low;
    }

    if cpu_count <= MEDIUM_MAX_CPU_COUNT || total_mem_gb <= MEDIUM_MAX_TOTAL_MEM_GB {
        return ProfileName::Medium;
    }

    ProfileName::High
}
