//! Preset limits per profile

use super::ProfileName;
use serde::{Deserialize, Serialize};

/// Batching and concurrency bounds handed to the indexing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileLimits {
    /// Code segments accumulated before a batch is embedded and upserted
    pub batch_segment_threshold: usize,
    /// Files parsed concurrently by the parser pool
    pub parsing_concurrency: usize,
    /// Batches embedded and upserted concurrently
    pub batch_processing_concurrency: usize,
    /// In-flight batches allowed before producers must wait
    pub max_pending_batches: usize,
}

const LOW: ProfileLimits = ProfileLimits {
    batch_segment_threshold: 16,
    parsing_concurrency: 2,
    batch_processing_concurrency: 2,
    max_pending_batches: 4,
};

const MEDIUM: ProfileLimits = ProfileLimits {
    batch_segment_threshold: 32,
    parsing_concurrency: 4,
    batch_processing_concurrency: 4,
    max_pending_batches: 10,
};

const HIGH: ProfileLimits = ProfileLimits {
    batch_segment_threshold: 60,
    parsing_concurrency: 10,
    batch_processing_concurrency: 10,
    max_pending_batches: 20,
};

impl ProfileLimits {
    /// Looks up the preset for a profile
    pub const fn for_profile(profile: ProfileName) -> Self {
        match profile {
            ProfileName::Low => LOW,
            ProfileName::Medium => MEDIUM,
            ProfileName::High => HIGH,
        }
    }

    /// Field-wise `self <= other`
    #[cfg(test)]
    pub(crate) fn fits_within(&self, other: &ProfileLimits) -> bool {
        self.batch_segment_threshold <= other.batch_segment_threshold
            && self.parsing_concurrency <= other.parsing_concurrency
            && self.batch_processing_concurrency <= other.batch_processing_concurrency
            && self.max_pending_batches <= other.max_pending_batches
    }

    /// Every bound is non-zero
    pub(crate) fn is_valid(&self) -> bool {
        self.batch_segment_threshold > 0
            && self.parsing_concurrency > 0
            && self.batch_processing_concurrency > 0
            && self.max_pending_batches > 0
    }
}
