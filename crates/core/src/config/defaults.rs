//! Default values and functions for configuration

pub(crate) fn default_max_block_chars() -> usize {
    1000
}

pub(crate) fn default_min_block_chars() -> usize {
    50
}

/// Minimum characters for the next chunk after a split
pub(crate) fn default_min_chunk_remainder_chars() -> usize {
    200
}

/// 15% tolerance over max_block_chars before a block is split
pub(crate) fn default_max_chars_tolerance_factor() -> f64 {
    1.15
}

pub(crate) fn default_max_list_files() -> usize {
    50_000
}

pub(crate) fn default_max_file_size_bytes() -> u64 {
    1024 * 1024 // 1MB
}

pub(crate) fn default_max_batch_retries() -> u32 {
    3
}

pub(crate) fn default_initial_retry_delay_ms() -> u64 {
    500
}

pub(crate) fn default_max_batch_tokens() -> usize {
    100_000
}

pub(crate) fn default_max_item_tokens() -> usize {
    8191
}

pub(crate) fn default_gemini_max_item_tokens() -> usize {
    2048
}

pub(crate) fn default_search_min_score() -> f32 {
    0.4
}

pub(crate) fn default_search_max_results() -> usize {
    50
}
