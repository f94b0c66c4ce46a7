//! phish_enrich library: network reputation features for URL tables
//!
//! This library adds two network-derived signals to each row of a URL feature
//! table: the registration age of the URL's domain (via a cached WHOIS service
//! lookup) and the remaining lifetime of the TLS certificate it serves (via a
//! live handshake). Lookups never fail a run; anything that cannot be measured
//! is recorded as `-1.0`.
//!
//! # Example
//!
//! ```no_run
//! use phish_enrich::{run_enrichment, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: PathBuf::from("data/processed/features.csv"),
//!     output: PathBuf::from("data/processed/features_with_network.csv"),
//!     whois_api_key: std::env::var("WHOISXML_API_KEY").ok(),
//!     ..Default::default()
//! };
//!
//! let report = run_enrichment(config).await?;
//! println!("Enriched {} rows", report.total_rows);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

mod app;
#[allow(missing_docs)]
pub mod config;
mod domain;
#[allow(missing_docs)]
pub mod enrich;
#[allow(missing_docs)]
pub mod error_handling;
pub mod initialization;
#[allow(missing_docs)]
pub mod models;
#[allow(missing_docs)]
pub mod table;
#[allow(missing_docs)]
pub mod tls;
mod utils;
#[allow(missing_docs)]
pub mod whois;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt, SENTINEL};
pub use domain::extract_host;
pub use enrich::Enricher;
pub use error_handling::{EnrichmentStats, LookupFailure};
pub use models::{FeatureRecord, InputRow, Label};
pub use run::{run_enrichment, EnrichmentReport};
pub use tls::{CertificateInspector, CertificateResult, TlsInspector};
pub use whois::{WhoisCache, WhoisClient};

// Internal run module (wires the components together for one input table)
mod run {
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use log::{info, warn};

    use crate::app::{print_enrichment_statistics, print_simple_summary};
    use crate::config::Config;
    use crate::enrich::Enricher;
    use crate::error_handling::EnrichmentStats;
    use crate::initialization::{init_client, init_tls_inspector, timeout_from_secs};
    use crate::table::{read_input_table, write_output_table};
    use crate::whois::{WhoisCache, WhoisClient};

    /// Results of an enrichment run.
    #[derive(Debug, Clone)]
    pub struct EnrichmentReport {
        /// Number of rows read and written
        pub total_rows: usize,
        /// Domains whose age was served from the cache
        pub whois_cache_hits: usize,
        /// Requests sent to the domain-age service
        pub whois_lookups: usize,
        /// Rows whose certificate has at least one whole day left
        pub tls_valid: usize,
        /// Rows without a valid certificate: failed inspections plus certificates
        /// with less than one whole day left
        pub tls_invalid: usize,
        /// Where the enriched table was written
        pub output_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Enriches the table at `config.input` and writes it to `config.output`.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - A timeout in the configuration is not a positive number of seconds
    /// - The input table cannot be read or lacks `url`/`label` columns
    /// - The WHOIS cache file exists but is unreadable or malformed
    /// - The HTTP client or TLS configuration cannot be initialized
    /// - The output table cannot be written
    ///
    /// Individual WHOIS and TLS lookup failures are not errors.
    pub async fn run_enrichment(config: Config) -> Result<EnrichmentReport> {
        let start_time = Instant::now();

        let tls_timeout =
            timeout_from_secs(config.tls_timeout_secs).context("Invalid TLS timeout")?;
        if config.whois_timeout_secs == 0 {
            anyhow::bail!("Invalid WHOIS timeout: must be at least one second");
        }
        let whois_timeout = Duration::from_secs(config.whois_timeout_secs);

        let table = read_input_table(&config.input)?;
        info!(
            "Loaded {} rows from {}",
            table.rows.len(),
            config.input.display()
        );

        let mut cache =
            WhoisCache::load(&config.cache_file).context("Failed to load WHOIS cache")?;

        if config.whois_api_key.is_none() {
            warn!(
                "No WHOIS API key configured ({}); uncached domains will be recorded as unknown",
                crate::config::WHOIS_API_KEY_ENV
            );
        }

        let http = init_client(whois_timeout).context("Failed to initialize HTTP client")?;
        let whois = WhoisClient::new(
            http,
            config.whois_endpoint.clone(),
            config.whois_api_key.clone(),
            whois_timeout,
        );
        let inspector =
            init_tls_inspector(tls_timeout).context("Failed to initialize TLS inspector")?;

        let stats = EnrichmentStats::new();
        let enricher = Enricher::new(&whois, &inspector, &stats);

        info!("Computing domain age (cached) and inspecting TLS certificates…");
        let records = enricher.enrich_rows(&mut cache, table.rows).await;

        let total_rows = write_output_table(&config.output, &table.headers, &records)?;
        info!("Saved enriched features to {}", config.output.display());

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_enrichment_statistics(&stats);
        print_simple_summary(total_rows, elapsed_seconds);

        Ok(EnrichmentReport {
            total_rows,
            whois_cache_hits: stats.cache_hits(),
            whois_lookups: stats.whois_lookups(),
            tls_valid: stats.tls_valid(),
            tls_invalid: stats.tls_invalid(),
            output_path: config.output,
            elapsed_seconds,
        })
    }
}
