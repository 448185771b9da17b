//! End-to-end resolution from environment and config file into settings

use codeindex_core::{
    Config, IndexerSettings, ProfileName, ProfileResolver, ProfileSource, ResourceMetrics,
    RESOURCE_PROFILE_ENV_KEY,
};
use std::io::Write;

const BIG_HOST: ResourceMetrics = ResourceMetrics {
    cpu_count: 16,
    total_mem_gb: 64.0,
};

// Single test so environment mutations cannot race within this binary
#[test]
fn test_override_sources_in_precedence_order() {
    let resolver = ProfileResolver::with_probe(BIG_HOST);

    // No override anywhere: detection decides
    std::env::remove_var(RESOURCE_PROFILE_ENV_KEY);
    let resolved = resolver.resolve_from_env();
    assert_eq!(resolved.name(), ProfileName::High);
    assert_eq!(resolved.source(), ProfileSource::Detected(BIG_HOST));

    // Environment override, case and whitespace insensitive
    std::env::set_var(RESOURCE_PROFILE_ENV_KEY, "  LoW ");
    let resolved = resolver.resolve_from_env();
    assert_eq!(resolved.name(), ProfileName::Low);
    assert_eq!(resolved.limits().batch_segment_threshold, 16);
    assert_eq!(resolved.limits().max_pending_batches, 4);

    // Unsupported override falls through to detection
    std::env::set_var(RESOURCE_PROFILE_ENV_KEY, "unsupported");
    assert_eq!(resolver.resolve_from_env().name(), ProfileName::High);

    // Config file override, then environment beating it
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(file, "[resources]\nprofile = \"medium\"").expect("write config");

    std::env::remove_var(RESOURCE_PROFILE_ENV_KEY);
    let config = Config::load(Some(file.path())).expect("load config");
    let settings = IndexerSettings::build(config, &resolver).expect("build settings");
    assert_eq!(settings.profile_name(), ProfileName::Medium);
    assert_eq!(settings.parsing_concurrency(), 4);

    std::env::set_var(RESOURCE_PROFILE_ENV_KEY, "low");
    let config = Config::load(Some(file.path())).expect("load config");
    let settings = IndexerSettings::build(config, &resolver).expect("build settings");
    assert_eq!(settings.profile_name(), ProfileName::Low);
    assert_eq!(settings.batch_processing_concurrency(), 2);

    std::env::remove_var(RESOURCE_PROFILE_ENV_KEY);
}
