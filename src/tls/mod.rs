//! TLS certificate freshness inspection.
//!
//! Connects to `domain:443`, completes a handshake against the Mozilla root set
//! (`webpki-roots`), and reads the leaf certificate's expiry with `x509-parser`.
//! Nothing is cached; every call is a live round trip.
//!
//! Uses `tokio-rustls` for async TLS connections.

mod extract;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rustls::crypto::ring::default_provider;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use crate::config::{SENTINEL, TLS_PORT};
use crate::error_handling::LookupFailure;

/// Remaining lifetime of a domain's certificate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CertificateResult {
    /// Whole days until expiry, or the sentinel
    pub days_remaining: f64,
    /// True iff `days_remaining > 0`
    pub valid: bool,
}

impl CertificateResult {
    pub fn from_days(days: i64) -> Self {
        Self {
            days_remaining: days as f64,
            valid: days > 0,
        }
    }

    /// The result recorded for any failed inspection.
    pub fn sentinel() -> Self {
        Self {
            days_remaining: SENTINEL,
            valid: false,
        }
    }

    /// Absorbs a failed inspection into the sentinel.
    pub fn from_outcome(outcome: Result<CertificateResult, LookupFailure>) -> Self {
        outcome.unwrap_or_else(|_| Self::sentinel())
    }

    /// 0/1 column value.
    pub fn valid_flag(&self) -> u8 {
        u8::from(self.valid)
    }
}

/// Something that can measure a domain's certificate lifetime.
///
/// Implemented by [`TlsInspector`] for live handshakes; the enrichment pipeline is
/// generic over it.
pub trait CertificateInspector {
    /// Inspects `domain`'s certificate, reporting why when no measurement exists.
    fn try_inspect(
        &self,
        domain: &str,
    ) -> impl std::future::Future<Output = Result<CertificateResult, LookupFailure>> + Send;
}

/// Live TLS certificate inspector.
#[derive(Clone)]
pub struct TlsInspector {
    connector: TlsConnector,
    port: u16,
    timeout: Duration,
}

impl TlsInspector {
    /// Inspector using the platform-independent Mozilla root set on port 443.
    ///
    /// `timeout` bounds the TCP connect and the TLS handshake separately.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS client configuration cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, rustls::Error> {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        Self::with_roots(root_store, TLS_PORT, timeout)
    }

    /// Inspector trusting `root_store` and connecting to `port`.
    pub fn with_roots(
        root_store: RootCertStore,
        port: u16,
        timeout: Duration,
    ) -> Result<Self, rustls::Error> {
        let config = ClientConfig::builder_with_provider(Arc::new(default_provider()))
            .with_safe_default_protocol_versions()?
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
            port,
            timeout,
        })
    }

    /// Days until `domain`'s certificate expires, or the sentinel on any failure.
    pub async fn days_until_expiry(&self, domain: &str) -> f64 {
        self.inspect(domain).await.days_remaining
    }

    /// Whether `domain` presents a certificate with at least one whole day left.
    ///
    /// Performs its own round trip; use [`TlsInspector::inspect`] when the day
    /// count is needed as well.
    pub async fn is_valid(&self, domain: &str) -> bool {
        self.inspect(domain).await.valid
    }

    /// One round trip yielding both the day count and the validity flag.
    pub async fn inspect(&self, domain: &str) -> CertificateResult {
        let outcome = self.try_inspect(domain).await;
        if let Err(failure) = &outcome {
            log::warn!("TLS inspection failed for {domain}: {failure}");
        }
        CertificateResult::from_outcome(outcome)
    }

    async fn fetch_leaf_certificate(&self, domain: &str) -> Result<Vec<u8>, LookupFailure> {
        if domain.is_empty() {
            return Err(LookupFailure::DomainParse);
        }

        let server_name = ServerName::try_from(domain.to_string())
            .map_err(|e| LookupFailure::Certificate(format!("invalid server name: {e}")))?;

        log::debug!("Connecting to {domain}:{}", self.port);
        let sock = match tokio::time::timeout(
            self.timeout,
            TcpStream::connect((domain, self.port)),
        )
        .await
        {
            Ok(Ok(sock)) => sock,
            Ok(Err(e)) => {
                return Err(LookupFailure::Network(format!(
                    "failed to connect to {domain}:{}: {e}",
                    self.port
                )))
            }
            Err(_) => {
                return Err(LookupFailure::Network(format!(
                    "TCP connection timeout for {domain}:{} ({:.1}s)",
                    self.port,
                    self.timeout.as_secs_f64()
                )))
            }
        };

        let tls_stream = match tokio::time::timeout(
            self.timeout,
            self.connector.connect(server_name, sock),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(LookupFailure::Certificate(format!(
                    "TLS handshake failed: {e}"
                )))
            }
            Err(_) => {
                return Err(LookupFailure::Network(format!(
                    "TLS handshake timeout ({:.1}s)",
                    self.timeout.as_secs_f64()
                )))
            }
        };

        tls_stream
            .get_ref()
            .1
            .peer_certificates()
            .and_then(|certs| certs.first())
            .map(|cert| cert.as_ref().to_vec())
            .ok_or_else(|| LookupFailure::Certificate("no peer certificate".to_string()))
    }
}

impl CertificateInspector for TlsInspector {
    async fn try_inspect(&self, domain: &str) -> Result<CertificateResult, LookupFailure> {
        let der = self.fetch_leaf_certificate(domain).await?;
        let days = extract::days_remaining(&der, Utc::now())?;
        log::debug!("Certificate for {domain} expires in {days} days");
        Ok(CertificateResult::from_days(days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_result_from_days() {
        let fresh = CertificateResult::from_days(30);
        assert_eq!(fresh.days_remaining, 30.0);
        assert!(fresh.valid);
        assert_eq!(fresh.valid_flag(), 1);

        let last_day = CertificateResult::from_days(0);
        assert_eq!(last_day.days_remaining, 0.0);
        assert!(!last_day.valid);

        let expired = CertificateResult::from_days(-12);
        assert!(!expired.valid);
        assert_eq!(expired.valid_flag(), 0);
    }

    #[test]
    fn test_failure_becomes_sentinel() {
        let result =
            CertificateResult::from_outcome(Err(LookupFailure::Network("refused".into())));
        assert_eq!(result, CertificateResult::sentinel());
        assert_eq!(result.days_remaining, -1.0);
        assert!(!result.valid);
    }

    #[tokio::test]
    async fn test_empty_domain_is_not_contacted() {
        let inspector = TlsInspector::new(Duration::from_millis(200)).expect("inspector");
        assert_eq!(
            inspector.try_inspect("").await,
            Err(LookupFailure::DomainParse)
        );
        assert_eq!(inspector.days_until_expiry("").await, -1.0);
    }

    #[tokio::test]
    async fn test_refused_connection_is_sentinel() {
        // Bind then drop a listener to get a local port nothing listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let inspector =
            TlsInspector::with_roots(RootCertStore::empty(), port, Duration::from_secs(2))
                .expect("inspector");

        let outcome = inspector.try_inspect("127.0.0.1").await;
        assert!(matches!(outcome, Err(LookupFailure::Network(_))));
        assert!(!inspector.is_valid("127.0.0.1").await);
        assert_eq!(inspector.days_until_expiry("127.0.0.1").await, -1.0);
    }
}
