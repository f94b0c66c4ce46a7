//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - HTTP client for the domain-age service
//! - TLS certificate inspector
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use std::time::Duration;

use crate::error_handling::InitializationError;
use crate::tls::TlsInspector;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Converts a timeout in (possibly fractional) seconds into a `Duration`.
///
/// # Errors
///
/// Returns `InitializationError::InvalidTimeoutError` for zero, negative, NaN or
/// overflowing values.
pub fn timeout_from_secs(secs: f64) -> Result<Duration, InitializationError> {
    match Duration::try_from_secs_f64(secs) {
        Ok(d) if !d.is_zero() => Ok(d),
        _ => Err(InitializationError::InvalidTimeoutError(format!(
            "{secs} seconds"
        ))),
    }
}

/// Initializes the live TLS inspector with the Mozilla root set.
///
/// # Errors
///
/// Returns `InitializationError::TlsConfigError` if the client configuration
/// cannot be built.
pub fn init_tls_inspector(timeout: Duration) -> Result<TlsInspector, InitializationError> {
    Ok(TlsInspector::new(timeout)?)
}
