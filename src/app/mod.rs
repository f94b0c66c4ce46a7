//! Run reporting helpers used by the enrichment entry point.

pub mod statistics;

// Re-export public API
pub use statistics::{print_enrichment_statistics, print_simple_summary};
