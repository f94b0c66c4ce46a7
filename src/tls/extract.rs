//! Certificate expiry extraction.

use chrono::{DateTime, Utc};

use crate::error_handling::LookupFailure;
use crate::utils::whole_days_between;

/// Reads the "not valid after" timestamp of a DER-encoded X.509 certificate.
pub(crate) fn certificate_not_after(der: &[u8]) -> Result<DateTime<Utc>, LookupFailure> {
    let (_, cert) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| LookupFailure::Certificate(format!("failed to parse certificate: {e}")))?;

    let not_after = cert.validity().not_after.timestamp();
    DateTime::from_timestamp(not_after, 0).ok_or_else(|| {
        LookupFailure::Certificate(format!("notAfter out of range: {not_after}"))
    })
}

/// Whole days between `now` and the certificate's expiry, negative once expired.
pub(crate) fn days_remaining(der: &[u8], now: DateTime<Utc>) -> Result<i64, LookupFailure> {
    let not_after = certificate_not_after(der)?;
    Ok(whole_days_between(not_after, now))
}
