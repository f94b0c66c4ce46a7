//! Per-row enrichment pipeline.
//!
//! Rows are processed strictly in input order, one at a time: host extraction,
//! then the WHOIS age, then a single TLS inspection whose day count also yields the
//! validity flag. No state is carried between rows apart from the WHOIS cache.

use crate::domain::extract_host;
use crate::error_handling::{EnrichmentStats, FailureKind, LookupFailure, Stage};
use crate::models::{FeatureRecord, InputRow};
use crate::tls::{CertificateInspector, CertificateResult};
use crate::whois::{AgeSource, WhoisCache, WhoisClient};

/// Drives the WHOIS client and certificate inspector over input rows.
pub struct Enricher<'a, I> {
    whois: &'a WhoisClient,
    inspector: &'a I,
    stats: &'a EnrichmentStats,
}

impl<'a, I: CertificateInspector> Enricher<'a, I> {
    pub fn new(whois: &'a WhoisClient, inspector: &'a I, stats: &'a EnrichmentStats) -> Self {
        Self {
            whois,
            inspector,
            stats,
        }
    }

    /// Enriches every row, preserving input order.
    pub async fn enrich_rows(
        &self,
        cache: &mut WhoisCache,
        rows: Vec<InputRow>,
    ) -> Vec<FeatureRecord> {
        let total = rows.len();
        let mut records = Vec::with_capacity(total);

        for (i, row) in rows.into_iter().enumerate() {
            records.push(self.enrich_row(cache, row).await);

            let done = i + 1;
            if done % PROGRESS_INTERVAL == 0 || done == total {
                log::info!("Enriched {done}/{total} rows");
            }
        }

        records
    }

    /// Enriches one row.
    pub async fn enrich_row(&self, cache: &mut WhoisCache, row: InputRow) -> FeatureRecord {
        let domain = extract_host(&row.url);
        if domain.is_empty() {
            log::debug!("No host in {:?}", row.url);
        }

        let age = self.whois.resolve(cache, &domain).await;
        match age.source {
            AgeSource::Cache => self.stats.increment_cache_hit(),
            AgeSource::Service => self.stats.increment_whois_lookup(),
            AgeSource::Failed(kind) => {
                if kind != FailureKind::DomainParse {
                    self.stats.increment_whois_lookup();
                }
                self.stats.increment_failure(Stage::Whois, kind);
            }
        }
        if !age.persisted {
            self.stats.increment_cache_write_failure();
        }

        let certificate = self.inspect(&domain).await;
        self.stats.record_tls_outcome(certificate.valid);

        FeatureRecord {
            url: row.url,
            label: row.label,
            domain,
            domain_age_days: age.age_days,
            tls_days_valid: certificate.days_remaining,
            tls_valid_flag: certificate.valid_flag(),
            passthrough: row.fields,
        }
    }

    async fn inspect(&self, domain: &str) -> CertificateResult {
        let outcome = self.inspector.try_inspect(domain).await;
        match &outcome {
            Ok(_) => {}
            Err(LookupFailure::DomainParse) => {
                self.stats.increment_failure(Stage::Tls, FailureKind::DomainParse);
            }
            Err(failure) => {
                log::warn!("TLS inspection failed for {domain}: {failure}");
                self.stats.increment_failure(Stage::Tls, failure.kind());
            }
        }
        CertificateResult::from_outcome(outcome)
    }
}

/// Rows between progress log lines
const PROGRESS_INTERVAL: usize = 100;
