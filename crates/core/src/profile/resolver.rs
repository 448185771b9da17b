//! Startup profile resolution
//!
//! An explicit override always wins and is never blended with detected
//! metrics. Host metrics are only queried when no valid override exists.

use super::{classify, ProfileLimits, ProfileName};
use crate::metrics::{MetricsProbe, ResourceMetrics, SystemProbe};
use serde::Serialize;
use tracing::{info, warn};

/// Environment variable naming a profile override
pub const RESOURCE_PROFILE_ENV_KEY: &str = "CODEINDEX_RESOURCE_PROFILE";

/// How the active profile was chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileSource {
    /// An operator override named the profile
    Override,
    /// The profile was classified from these host metrics
    Detected(ResourceMetrics),
}

/// The profile and limits in effect for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedProfile {
    name: ProfileName,
    limits: ProfileLimits,
    source: ProfileSource,
}

impl ResolvedProfile {
    fn new(name: ProfileName, source: ProfileSource) -> Self {
        let limits = ProfileLimits::for_profile(name);
        debug_assert!(limits.is_valid(), "preset for {name} has a zero limit");
        Self {
            name,
            limits,
            source,
        }
    }

    pub fn name(&self) -> ProfileName {
        self.name
    }

    pub fn limits(&self) -> ProfileLimits {
        self.limits
    }

    pub fn source(&self) -> ProfileSource {
        self.source
    }

    pub fn is_override(&self) -> bool {
        matches!(self.source, ProfileSource::Override)
    }
}

/// Resolves the resource profile once at startup
///
/// The result is a plain value; callers pass it to the components that need
/// it rather than reading shared global state.
#[derive(Debug, Clone, Default)]
pub struct ProfileResolver<P = SystemProbe> {
    probe: P,
}

impl ProfileResolver<SystemProbe> {
    /// Resolver that detects metrics from the running host
    pub fn new() -> Self {
        Self { probe: SystemProbe }
    }
}

impl<P: MetricsProbe> ProfileResolver<P> {
    /// Resolver with a custom metrics source
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }

    /// Resolves the profile, honouring `override_value` when it names one
    ///
    /// Unrecognized overrides are ignored and detection proceeds as if none
    /// was given.
    pub fn resolve(&self, override_value: Option<&str>) -> ResolvedProfile {
        if let Some(name) = ProfileName::from_override(override_value) {
            info!("Using resource profile '{name}' from override");
            return ResolvedProfile::new(name, ProfileSource::Override);
        }

        if let Some(raw) = override_value.filter(|v| !v.trim().is_empty()) {
            warn!("Ignoring unrecognized resource profile override '{raw}' (expected low, medium or high)");
        }

        let metrics = self.probe.detect();
        let name = classify(&metrics);
        info!(
            "Using resource profile '{name}' for {} CPUs and {:.1} GiB of memory",
            metrics.cpu_count, metrics.total_mem_gb
        );
        ResolvedProfile::new(name, ProfileSource::Detected(metrics))
    }

    /// Resolves the profile using [`RESOURCE_PROFILE_ENV_KEY`] as the override
    pub fn resolve_from_env(&self) -> ResolvedProfile {
        let override_value = std::env::var(RESOURCE_PROFILE_ENV_KEY).ok();
        self.resolve(override_value.as_deref())
    }
}
