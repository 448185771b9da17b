//! codeindex CLI - resource profile inspection
//!
//! This binary resolves the resource profile the indexing pipeline would run
//! with on this host and prints the limits it derives.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codeindex_core::{
    Config, IndexerSettings, ProfileLimits, ProfileName, ProfileResolver, ProfileSource,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use strum::IntoEnumIterator;
use tracing::debug;

#[derive(Parser)]
#[command(name = "codeindex")]
#[command(about = "Resource profile resolver for the code indexing pipeline")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Resource profile override (takes precedence over environment and config file)
    #[arg(long, value_name = "NAME", global = true)]
    profile: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and show the active resource profile
    Profile,
    /// Show preset limits for a named profile
    Limits {
        /// Profile name: low, medium or high
        #[arg(value_parser = parse_profile_name)]
        name: ProfileName,
    },
    /// Show the preset limits of every profile
    Presets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    match &cli.command {
        Some(Commands::Profile) => show_profile(&cli),
        Some(Commands::Limits { name }) => show_limits(*name, cli.json),
        Some(Commands::Presets) => show_presets(cli.json),
        None => {
            println!("Run 'codeindex profile' to show the active resource profile, or --help for more options");
            Ok(())
        }
    }
}

/// Initialize logging system
///
/// Logs go to stderr so that `--json` output stays machine readable.
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "codeindex_core={level},{}={level}",
            env!("CARGO_PKG_NAME")
        ))
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn parse_profile_name(value: &str) -> std::result::Result<ProfileName, String> {
    ProfileName::from_override(Some(value))
        .ok_or_else(|| format!("unknown profile '{value}' (expected low, medium or high)"))
}

fn show_profile(cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(profile) = &cli.profile {
        debug!("Profile override from command line: {profile}");
        config.resources.profile = Some(profile.clone());
    }

    let settings = IndexerSettings::build(config, &ProfileResolver::new())
        .context("Invalid configuration")?;
    let resolved = settings.profile();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(resolved)?);
        return Ok(());
    }

    println!("Profile: {}", resolved.name());
    match resolved.source() {
        ProfileSource::Override => println!("Source:  override"),
        ProfileSource::Detected(metrics) => println!(
            "Source:  detected ({} CPUs, {:.1} GiB memory)",
            metrics.cpu_count, metrics.total_mem_gb
        ),
    }
    print_limits(&resolved.limits());
    Ok(())
}

fn show_limits(name: ProfileName, json: bool) -> Result<()> {
    let limits = name.limits();
    if json {
        println!("{}", serde_json::to_string_pretty(&limits)?);
        return Ok(());
    }

    println!("Profile: {name}");
    print_limits(&limits);
    Ok(())
}

fn show_presets(json: bool) -> Result<()> {
    if json {
        let presets: BTreeMap<ProfileName, ProfileLimits> =
            ProfileName::iter().map(|name| (name, name.limits())).collect();
        println!("{}", serde_json::to_string_pretty(&presets)?);
        return Ok(());
    }

    println!(
        "{:<8} {:>9} {:>8} {:>8} {:>8}",
        "profile", "threshold", "parsing", "batches", "pending"
    );
    for name in ProfileName::iter() {
        let limits = name.limits();
        let label = name.to_string();
        println!(
            "{:<8} {:>9} {:>8} {:>8} {:>8}",
            label,
            limits.batch_segment_threshold,
            limits.parsing_concurrency,
            limits.batch_processing_concurrency,
            limits.max_pending_batches
        );
    }
    Ok(())
}

fn print_limits(limits: &ProfileLimits) {
    println!("  batch_segment_threshold:      {}", limits.batch_segment_threshold);
    println!("  parsing_concurrency:          {}", limits.parsing_concurrency);
    println!("  batch_processing_concurrency: {}", limits.batch_processing_concurrency);
    println!("  max_pending_batches:          {}", limits.max_pending_batches);
}
