//! Error handling and enrichment statistics.
//!
//! This module provides:
//! - Typed errors for startup and cache persistence
//! - `LookupFailure`, the classified reason a WHOIS or TLS lookup produced no value
//! - `EnrichmentStats`, counters for cache hits, network calls and failures
//!
//! Lookup failures never propagate past the component that produced them: each is
//! counted, logged and replaced by the sentinel value.

mod stats;
mod types;

// Re-export public API
pub use stats::EnrichmentStats;
pub use types::{CacheError, FailureKind, InitializationError, LookupFailure, Stage};
