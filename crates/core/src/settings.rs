//! Immutable settings handed to pipeline components
//!
//! Built once at startup from the loaded [`Config`] and the resolved resource
//! profile, then cloned into every component that needs it.

use crate::config::{
    Config, EmbedderConfig, ParserConfig, RetryConfig, ScannerConfig, SearchConfig,
};
use crate::error::Result;
use crate::metrics::MetricsProbe;
use crate::profile::{ProfileLimits, ProfileName, ProfileResolver, ResolvedProfile};
use std::sync::Arc;

#[derive(Debug)]
struct Inner {
    profile: ResolvedProfile,
    parser: ParserConfig,
    scanner: ScannerConfig,
    retry: RetryConfig,
    embedder: EmbedderConfig,
    search: SearchConfig,
}

/// Read-only pipeline settings shared across workers
#[derive(Debug, Clone)]
pub struct IndexerSettings {
    inner: Arc<Inner>,
}

impl IndexerSettings {
    /// Validates `config` and resolves the resource profile
    ///
    /// `config.resources.profile` is used as the override; an unrecognized
    /// value falls back to detection through `resolver`.
    pub fn build<P: MetricsProbe>(config: Config, resolver: &ProfileResolver<P>) -> Result<Self> {
        config.validate()?;
        let profile = resolver.resolve(config.resources.profile.as_deref());
        Ok(Self::from_parts(config, profile))
    }

    /// Combines an already resolved profile with the fixed pipeline constants
    pub fn from_parts(config: Config, profile: ResolvedProfile) -> Self {
        let Config {
            parser,
            scanner,
            retry,
            embedder,
            search,
            ..
        } = config;

        Self {
            inner: Arc::new(Inner {
                profile,
                parser,
                scanner,
                retry,
                embedder,
                search,
            }),
        }
    }

    pub fn profile(&self) -> &ResolvedProfile {
        &self.inner.profile
    }

    pub fn profile_name(&self) -> ProfileName {
        self.inner.profile.name()
    }

    pub fn limits(&self) -> ProfileLimits {
        self.inner.profile.limits()
    }

    /// Segments accumulated before a batch is embedded and upserted
    pub fn batch_segment_threshold(&self) -> usize {
        self.limits().batch_segment_threshold
    }

    /// Width of the parser worker pool
    pub fn parsing_concurrency(&self) -> usize {
        self.limits().parsing_concurrency
    }

    /// Width of the embedding/upsert worker pool
    pub fn batch_processing_concurrency(&self) -> usize {
        self.limits().batch_processing_concurrency
    }

    /// Ceiling on un-flushed batches before producers block
    pub fn max_pending_batches(&self) -> usize {
        self.limits().max_pending_batches
    }

    pub fn parser(&self) -> &ParserConfig {
        &self.inner.parser
    }

    pub fn scanner(&self) -> &ScannerConfig {
        &self.inner.scanner
    }

    pub fn retry(&self) -> &RetryConfig {
        &self.inner.retry
    }

    pub fn embedder(&self) -> &EmbedderConfig {
        &self.inner.embedder
    }

    pub fn search(&self) -> &SearchConfig {
        &self.inner.search
    }
}
