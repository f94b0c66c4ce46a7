//! Enrichment statistics tracking.
//!
//! Counters for cache usage, network calls and classified failures. Atomic so the
//! tracker can be shared by reference with every component of a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{FailureKind, Stage};

/// Processing statistics for one enrichment run.
///
/// All (stage, failure kind) pairs are initialized to zero on creation.
pub struct EnrichmentStats {
    failures: HashMap<(Stage, FailureKind), AtomicUsize>,
    whois_cache_hits: AtomicUsize,
    whois_lookups: AtomicUsize,
    cache_write_failures: AtomicUsize,
    tls_valid: AtomicUsize,
    tls_invalid: AtomicUsize,
}

impl Default for EnrichmentStats {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrichmentStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for stage in Stage::iter() {
            for kind in FailureKind::iter() {
                failures.insert((stage, kind), AtomicUsize::new(0));
            }
        }

        EnrichmentStats {
            failures,
            whois_cache_hits: AtomicUsize::new(0),
            whois_lookups: AtomicUsize::new(0),
            cache_write_failures: AtomicUsize::new(0),
            tls_valid: AtomicUsize::new(0),
            tls_invalid: AtomicUsize::new(0),
        }
    }

    /// Increment a failure counter.
    pub fn increment_failure(&self, stage: Stage, kind: FailureKind) {
        if let Some(counter) = self.failures.get(&(stage, kind)) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?}/{:?} which is not in the map",
                stage,
                kind
            );
        }
    }

    pub fn increment_cache_hit(&self) {
        self.whois_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_whois_lookup(&self) {
        self.whois_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cache_write_failure(&self) {
        self.cache_write_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the validity flag of one row's certificate check.
    pub fn record_tls_outcome(&self, valid: bool) {
        if valid {
            self.tls_valid.fetch_add(1, Ordering::Relaxed);
        } else {
            self.tls_invalid.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Returns 0 for pairs that were never incremented.
    pub fn failure_count(&self, stage: Stage, kind: FailureKind) -> usize {
        self.failures
            .get(&(stage, kind))
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total failures recorded for one stage.
    pub fn stage_failures(&self, stage: Stage) -> usize {
        FailureKind::iter()
            .map(|kind| self.failure_count(stage, kind))
            .sum()
    }

    pub fn total_failures(&self) -> usize {
        self.failures.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    pub fn cache_hits(&self) -> usize {
        self.whois_cache_hits.load(Ordering::SeqCst)
    }

    pub fn whois_lookups(&self) -> usize {
        self.whois_lookups.load(Ordering::SeqCst)
    }

    pub fn cache_write_failures(&self) -> usize {
        self.cache_write_failures.load(Ordering::SeqCst)
    }

    pub fn tls_valid(&self) -> usize {
        self.tls_valid.load(Ordering::SeqCst)
    }

    pub fn tls_invalid(&self) -> usize {
        self.tls_invalid.load(Ordering::SeqCst)
    }
}
