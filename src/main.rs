//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `phish_enrich` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use phish_enrich::initialization::init_logger_with;
use phish_enrich::{run_enrichment, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load WHOISXML_API_KEY from .env before clap reads the environment.
    // Try the current directory first, then next to the executable.
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_enrichment(config).await {
        Ok(report) => {
            println!(
                "✅ Enriched {} row{} ({} WHOIS cache hit{}, {} lookup{}, {} valid certificate{}) in {:.1}s",
                report.total_rows,
                if report.total_rows == 1 { "" } else { "s" },
                report.whois_cache_hits,
                if report.whois_cache_hits == 1 { "" } else { "s" },
                report.whois_lookups,
                if report.whois_lookups == 1 { "" } else { "s" },
                report.tls_valid,
                if report.tls_valid == 1 { "" } else { "s" },
                report.elapsed_seconds
            );
            println!("Results saved in {}", report.output_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("phish-enrich error: {:#}", e);
            process::exit(1);
        }
    }
}
