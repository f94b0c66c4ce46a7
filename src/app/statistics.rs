//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{EnrichmentStats, FailureKind, Stage};

/// Prints cache usage, TLS outcomes and per-stage failure counts to the log.
pub fn print_enrichment_statistics(stats: &EnrichmentStats) {
    info!(
        "WHOIS: {} cache hit{}, {} service lookup{}",
        stats.cache_hits(),
        if stats.cache_hits() == 1 { "" } else { "s" },
        stats.whois_lookups(),
        if stats.whois_lookups() == 1 { "" } else { "s" },
    );
    info!(
        "TLS: {} valid, {} invalid or unreachable",
        stats.tls_valid(),
        stats.tls_invalid()
    );

    if stats.cache_write_failures() > 0 {
        log::warn!(
            "{} WHOIS cache write(s) failed; unsaved results will be looked up again next run",
            stats.cache_write_failures()
        );
    }

    for stage in Stage::iter() {
        let total = stats.stage_failures(stage);
        if total == 0 {
            continue;
        }
        info!("{} failure counts ({} total):", stage, total);
        for kind in FailureKind::iter() {
            let count = stats.failure_count(stage, kind);
            if count > 0 {
                info!("   {}: {}", kind, count);
            }
        }
    }
}

/// Prints a one-line summary of the run.
pub fn print_simple_summary(total_rows: usize, elapsed_seconds: f64) {
    info!(
        "✅ Enriched {} row{} in {:.1}s",
        total_rows,
        if total_rows == 1 { "" } else { "s" },
        elapsed_seconds
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_statistics_does_not_panic() {
        let stats = EnrichmentStats::new();
        print_enrichment_statistics(&stats);

        stats.increment_failure(Stage::Whois, FailureKind::Response);
        stats.increment_failure(Stage::Tls, FailureKind::Certificate);
        stats.increment_cache_write_failure();
        print_enrichment_statistics(&stats);
        print_simple_summary(1, 0.25);
    }
}
