//! Configuration module for the codeindex pipeline
//!
//! This module provides configuration structures and loading mechanisms.
//! Configuration can be loaded from TOML files and/or environment variables.
//! The resource profile itself is not stored here; only the optional override
//! that feeds [`ProfileResolver`](crate::profile::ProfileResolver).

mod defaults;
mod loading;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.codeindex/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".codeindex").join("config.toml"))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Resource profile selection
    #[serde(default)]
    pub resources: ResourcesConfig,

    /// Code block chunking bounds
    #[serde(default)]
    pub parser: ParserConfig,

    /// Directory scanner bounds
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Batch retry parameters
    #[serde(default)]
    pub retry: RetryConfig,

    /// Embedder token caps
    #[serde(default)]
    pub embedder: EmbedderConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,
}

/// Resource profile selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Profile override: "low", "medium" or "high" (unset = detect from host)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

/// Configuration for splitting source files into code blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_max_block_chars")]
    pub max_block_chars: usize,

    #[serde(default = "default_min_block_chars")]
    pub min_block_chars: usize,

    /// Minimum characters left for the next chunk after a split
    #[serde(default = "default_min_chunk_remainder_chars")]
    pub min_chunk_remainder_chars: usize,

    /// Multiplier on max_block_chars tolerated before splitting
    #[serde(default = "default_max_chars_tolerance_factor")]
    pub max_chars_tolerance_factor: f64,
}

/// Configuration for directory scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Maximum files listed for a single workspace
    #[serde(default = "default_max_list_files")]
    pub max_list_files: usize,

    /// Files larger than this are skipped
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
}

/// Retry parameters for failed embedding/upsert batches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_batch_retries")]
    pub max_batch_retries: u32,

    /// Delay before the first retry; doubles on each attempt
    #[serde(default = "default_initial_retry_delay_ms")]
    pub initial_retry_delay_ms: u64,
}

/// Token caps for embedding requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedderConfig {
    /// Maximum tokens in a single embedding request
    #[serde(default = "default_max_batch_tokens")]
    pub max_batch_tokens: usize,

    /// Maximum tokens for a single item (OpenAI-compatible embedders)
    #[serde(default = "default_max_item_tokens")]
    pub max_item_tokens: usize,

    /// Maximum tokens for a single item (Gemini embedder)
    #[serde(default = "default_gemini_max_item_tokens")]
    pub gemini_max_item_tokens: usize,
}

/// Search result defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_min_score")]
    pub min_score: f32,

    #[serde(default = "default_search_max_results")]
    pub max_results: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_block_chars: default_max_block_chars(),
            min_block_chars: default_min_block_chars(),
            min_chunk_remainder_chars: default_min_chunk_remainder_chars(),
            max_chars_tolerance_factor: default_max_chars_tolerance_factor(),
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_list_files: default_max_list_files(),
            max_file_size_bytes: default_max_file_size_bytes(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_batch_retries: default_max_batch_retries(),
            initial_retry_delay_ms: default_initial_retry_delay_ms(),
        }
    }
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            max_batch_tokens: default_max_batch_tokens(),
            max_item_tokens: default_max_item_tokens(),
            gemini_max_item_tokens: default_gemini_max_item_tokens(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_score: default_search_min_score(),
            max_results: default_search_max_results(),
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt` (0-based), doubling each time
    pub fn delay_for_attempt(&self, attempt: u32) -> std::time::Duration {
        let factor = 2u64.saturating_pow(attempt);
        std::time::Duration::from_millis(self.initial_retry_delay_ms.saturating_mul(factor))
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate parser configuration
        if self.parser.min_block_chars == 0 {
            return Err(Error::config(
                "parser.min_block_chars must be greater than 0".to_string(),
            ));
        }
        if self.parser.min_block_chars >= self.parser.max_block_chars {
            return Err(Error::config(format!(
                "parser.min_block_chars ({}) must be less than max_block_chars ({})",
                self.parser.min_block_chars, self.parser.max_block_chars
            )));
        }
        if self.parser.min_chunk_remainder_chars > self.parser.max_block_chars {
            return Err(Error::config(format!(
                "parser.min_chunk_remainder_chars ({}) cannot exceed max_block_chars ({})",
                self.parser.min_chunk_remainder_chars, self.parser.max_block_chars
            )));
        }
        let tolerance = self.parser.max_chars_tolerance_factor;
        if !(1.0..=2.0).contains(&tolerance) {
            return Err(Error::config(format!(
                "parser.max_chars_tolerance_factor must be between 1.0 and 2.0 (got {tolerance})"
            )));
        }

        // Validate scanner configuration
        if self.scanner.max_list_files == 0 {
            return Err(Error::config(
                "scanner.max_list_files must be greater than 0".to_string(),
            ));
        }
        if self.scanner.max_file_size_bytes == 0 {
            return Err(Error::config(
                "scanner.max_file_size_bytes must be greater than 0".to_string(),
            ));
        }

        // Validate retry configuration
        if self.retry.max_batch_retries > 10 {
            return Err(Error::config(format!(
                "retry.max_batch_retries too large (max 10, got {})",
                self.retry.max_batch_retries
            )));
        }
        if self.retry.initial_retry_delay_ms > 60_000 {
            return Err(Error::config(format!(
                "retry.initial_retry_delay_ms too large (max 60000ms, got {})",
                self.retry.initial_retry_delay_ms
            )));
        }

        // Validate embedder configuration
        if self.embedder.max_item_tokens == 0 || self.embedder.gemini_max_item_tokens == 0 {
            return Err(Error::config(
                "embedder item token limits must be greater than 0".to_string(),
            ));
        }
        if self.embedder.max_item_tokens > self.embedder.max_batch_tokens {
            return Err(Error::config(format!(
                "embedder.max_item_tokens ({}) cannot exceed max_batch_tokens ({})",
                self.embedder.max_item_tokens, self.embedder.max_batch_tokens
            )));
        }

        // Validate search configuration
        if !(0.0..=1.0).contains(&self.search.min_score) {
            return Err(Error::config(format!(
                "search.min_score must be between 0.0 and 1.0 (got {})",
                self.search.min_score
            )));
        }
        if self.search.max_results == 0 {
            return Err(Error::config(
                "search.max_results must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, toml_string).context("Failed to write config file")?;

        Ok(())
    }
}
