//! Resource-aware configuration for the codeindex embedding pipeline
//!
//! This crate decides how aggressively the indexing pipeline may parallelize
//! work on the current host:
//!
//! - **Metrics**: best-effort detection of CPU count and physical memory
//! - **Profiles**: classification into `low`/`medium`/`high` and preset limits
//! - **Configuration**: TOML and environment configuration, including the
//!   profile override
//! - **Settings**: the immutable value handed to pipeline components
//! - **Error handling**: Unified error types
//!

pub mod config;
pub mod error;
pub mod metrics;
pub mod profile;
pub mod settings;

// Re-export main types for convenience
pub use config::Config;
pub use error::{Error, Result, ResultExt};
pub use metrics::{MetricsProbe, ResourceMetrics, SystemProbe};
pub use profile::{
    classify, ProfileLimits, ProfileName, ProfileResolver, ProfileSource, ResolvedProfile,
    RESOURCE_PROFILE_ENV_KEY,
};
pub use settings::IndexerSettings;
