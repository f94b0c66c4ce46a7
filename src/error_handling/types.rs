//! Error type definitions.
//!
//! Startup errors and cache persistence errors are real errors that surface to the
//! caller. Lookup failures are classified here and absorbed into the sentinel value
//! at the component that produced them.

use std::io;
use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{Display, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error building the TLS client configuration.
    #[error("TLS configuration error: {0}")]
    TlsConfigError(#[from] rustls::Error),

    /// A configured timeout is negative, NaN or too large.
    #[error("Invalid timeout: {0}")]
    InvalidTimeoutError(String),
}

/// Error types for the WHOIS cache file.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The cache file exists but could not be read.
    #[error("Failed to read cache file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cache file is not a JSON object of domain -> number.
    #[error("Failed to parse cache file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The cache could not be written back to disk.
    #[error("Failed to write cache file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The in-memory mapping could not be serialized.
    #[error("Failed to serialize cache: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a WHOIS or TLS lookup produced no measurement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// The URL has no usable host, so nothing was queried.
    #[error("no host could be extracted")]
    DomainParse,

    /// Connect, DNS, timeout or transport error.
    #[error("network error: {0}")]
    Network(String),

    /// The WHOIS service answered with something other than a usable creation date.
    #[error("unusable response: {0}")]
    Response(String),

    /// Handshake rejected, no peer certificate, or the certificate did not parse.
    #[error("certificate error: {0}")]
    Certificate(String),
}

impl LookupFailure {
    /// The counter bucket this failure belongs to.
    pub fn kind(&self) -> FailureKind {
        match self {
            LookupFailure::DomainParse => FailureKind::DomainParse,
            LookupFailure::Network(_) => FailureKind::Network,
            LookupFailure::Response(_) => FailureKind::Response,
            LookupFailure::Certificate(_) => FailureKind::Certificate,
        }
    }
}

/// Classification of lookup failures, used for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Display)]
pub enum FailureKind {
    DomainParse,
    Network,
    Response,
    Certificate,
}

/// The enrichment step a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Display)]
pub enum Stage {
    #[strum(serialize = "WHOIS")]
    Whois,
    #[strum(serialize = "TLS")]
    Tls,
}
