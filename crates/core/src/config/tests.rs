//! Tests for configuration module

use super::*;
use crate::error::{Error, Result};
use crate::profile::RESOURCE_PROFILE_ENV_KEY;
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::NamedTempFile;

// Tests that touch process environment must not interleave
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn create_temp_config_file(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .map_err(|e| Error::config(format!("Failed to create temp file: {e}")))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::config(format!("Failed to write temp file: {e}")))?;
    file.flush()
        .map_err(|e| Error::config(format!("Failed to flush temp file: {e}")))?;
    Ok(file)
}

fn with_env_var<F, T>(key: &str, value: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::set_var(key, value);
    let result = f();
    std::env::remove_var(key);
    result
}

#[test]
fn test_from_toml_str_empty_uses_defaults() {
    let config = Config::from_toml_str("").expect("Failed to parse empty TOML");
    assert_eq!(config.resources.profile, None);
    assert_eq!(config.parser.max_block_chars, 1000);
    assert_eq!(config.parser.min_block_chars, 50);
    assert_eq!(config.parser.min_chunk_remainder_chars, 200);
    assert_eq!(config.parser.max_chars_tolerance_factor, 1.15);
    assert_eq!(config.scanner.max_list_files, 50_000);
    assert_eq!(config.scanner.max_file_size_bytes, 1024 * 1024);
    assert_eq!(config.retry.max_batch_retries, 3);
    assert_eq!(config.retry.initial_retry_delay_ms, 500);
    assert_eq!(config.embedder.max_batch_tokens, 100_000);
    assert_eq!(config.embedder.max_item_tokens, 8191);
    assert_eq!(config.embedder.gemini_max_item_tokens, 2048);
    assert_eq!(config.search.min_score, 0.4);
    assert_eq!(config.search.max_results, 50);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_toml_str_valid() {
    let toml = r#"
        [resources]
        profile = "medium"

        [retry]
        max_batch_retries = 5
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse valid TOML");
    assert_eq!(config.resources.profile.as_deref(), Some("medium"));
    assert_eq!(config.retry.max_batch_retries, 5);
    assert_eq!(config.retry.initial_retry_delay_ms, 500);
}

#[test]
fn test_from_toml_str_invalid_syntax() {
    let toml = r#"
        [resources
        profile = "low"
    "#;

    let result = Config::from_toml_str(toml);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to parse TOML"));
}

#[test]
fn test_validate_rejects_inverted_block_bounds() {
    let toml = r#"
        [parser]
        min_block_chars = 2000
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse TOML");
    let err = config.validate().expect_err("inverted bounds should fail");
    assert!(err.to_string().contains("min_block_chars"));
}

#[test]
fn test_validate_rejects_out_of_range_tolerance() {
    let mut config = Config::default();
    config.parser.max_chars_tolerance_factor = 0.9;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_excessive_retries() {
    let mut config = Config::default();
    config.retry.max_batch_retries = 11;
    let err = config.validate().expect_err("too many retries should fail");
    assert!(err.to_string().contains("max_batch_retries"));
}

#[test]
fn test_validate_rejects_item_tokens_above_batch_tokens() {
    let mut config = Config::default();
    config.embedder.max_batch_tokens = 1000;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_min_score_out_of_range() {
    let mut config = Config::default();
    config.search.min_score = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_retry_delay_doubles() {
    let retry = RetryConfig::default();
    assert_eq!(retry.delay_for_attempt(0), Duration::from_millis(500));
    assert_eq!(retry.delay_for_attempt(1), Duration::from_millis(1000));
    assert_eq!(retry.delay_for_attempt(2), Duration::from_millis(2000));
}

#[test]
fn test_from_file_reads_toml() -> Result<()> {
    let file = create_temp_config_file(
        r#"
        [resources]
        profile = "high"

        [scanner]
        max_list_files = 1000
    "#,
    )?;

    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::remove_var(RESOURCE_PROFILE_ENV_KEY);
    let config = Config::from_file(file.path())?;
    assert_eq!(config.resources.profile.as_deref(), Some("high"));
    assert_eq!(config.scanner.max_list_files, 1000);
    assert_eq!(config.parser.max_block_chars, 1000);
    Ok(())
}

#[test]
fn test_from_file_missing_file_uses_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = with_env_var("CODEINDEX_UNRELATED", "1", || {
        Config::from_file(&dir.path().join("missing.toml"))
    })?;
    assert_eq!(config.search.max_results, 50);
    Ok(())
}

#[test]
fn test_profile_env_var_overrides_file() -> Result<()> {
    let file = create_temp_config_file(
        r#"
        [resources]
        profile = "high"
    "#,
    )?;

    let config = with_env_var(RESOURCE_PROFILE_ENV_KEY, " LoW ", || {
        Config::from_file(file.path())
    })?;
    // Stored verbatim; normalization happens in the resolver
    assert_eq!(config.resources.profile.as_deref(), Some(" LoW "));
    Ok(())
}

#[test]
fn test_nested_env_var_overrides_file() -> Result<()> {
    let file = create_temp_config_file(
        r#"
        [retry]
        max_batch_retries = 2
    "#,
    )?;

    let config = with_env_var("CODEINDEX_RETRY__MAX_BATCH_RETRIES", "7", || {
        Config::from_file(file.path())
    })?;
    assert_eq!(config.retry.max_batch_retries, 7);
    Ok(())
}

#[test]
fn test_nested_env_var_sets_profile_override() -> Result<()> {
    let file = create_temp_config_file(
        r#"
        [resources]
        profile = "low"
    "#,
    )?;

    let config = with_env_var("CODEINDEX_RESOURCES__PROFILE", "High", || {
        Config::from_file(file.path())
    })?;
    assert_eq!(config.resources.profile.as_deref(), Some("High"));
    Ok(())
}

#[test]
fn test_save_round_trips() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.resources.profile = Some("medium".to_string());
    config.retry.max_batch_retries = 4;
    config.save(&path)?;

    let loaded = Config::from_toml_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(loaded.resources.profile.as_deref(), Some("medium"));
    assert_eq!(loaded.retry.max_batch_retries, 4);
    Ok(())
}
