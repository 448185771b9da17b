//! Resource profiles for the indexing pipeline
//!
//! A profile is a coarse capacity tier for the host. It is chosen once at
//! startup, either from an explicit override or by classifying detected
//! [`ResourceMetrics`](crate::metrics::ResourceMetrics), and maps to a fixed
//! set of batching and concurrency limits.

mod classifier;
mod limits;
mod resolver;


use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub use classifier::{
    classify, LOW_MAX_CPU_COUNT, LOW_MAX_TOTAL_MEM_GB, MEDIUM_MAX_CPU_COUNT,
    MEDIUM_MAX_TOTAL_MEM_GB,
};
pub use limits::ProfileLimits;
pub use resolver::{ProfileResolver, ProfileSource, ResolvedProfile, RESOURCE_PROFILE_ENV_KEY};

/// Named capacity tier, ordered from least to most capable
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProfileName {
    Low,
    Medium,
    High,
}

impl ProfileName {
    /// Parses an operator-supplied override
    ///
    /// Surrounding whitespace and case are ignored. Empty or unrecognized
    /// values yield `None`; partial names are never matched.
    pub fn from_override(value: Option<&str>) -> Option<Self> {
        let normalized = value?.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        normalized.parse().ok()
    }

    /// Preset limits for this profile
    pub const fn limits(self) -> ProfileLimits {
        ProfileLimits::for_profile(self)
    }
}
