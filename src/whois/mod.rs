//! WHOIS domain-age lookup backed by a persistent cache.
//!
//! Ages come from the WhoisXML `WhoisService` endpoint and are cached forever,
//! failures included: a domain whose lookup failed is stored with the sentinel and
//! never queried again for the same cache file.

mod cache;
mod parse;

use std::time::Duration;

use chrono::Utc;

use crate::config::SENTINEL;
use crate::error_handling::{FailureKind, LookupFailure};
use crate::utils::whole_days_between;

pub use cache::WhoisCache;
use parse::parse_created_date;

/// Where an age value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeSource {
    /// Served from the cache without network access (cached sentinels included).
    Cache,
    /// Measured from a fresh service response.
    Service,
    /// The lookup failed or was skipped; the sentinel was stored.
    Failed(FailureKind),
}

/// Result of resolving one domain's age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeLookup {
    /// Age in whole days, or the sentinel
    pub age_days: f64,
    /// Where the value came from
    pub source: AgeSource,
    /// False when a new value could not be written to the cache file
    pub persisted: bool,
}

/// Client for the domain-age service.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl WhoisClient {
    /// Creates a client for `endpoint`.
    ///
    /// Requests are sent without `apiKey` when no key is given; the service then
    /// rejects them and every new domain resolves to the sentinel.
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key,
            timeout,
        }
    }

    /// Returns the age of `domain` in whole days, or the sentinel.
    ///
    /// See [`WhoisClient::resolve`].
    pub async fn age_days(&self, cache: &mut WhoisCache, domain: &str) -> f64 {
        self.resolve(cache, domain).await.age_days
    }

    /// Resolves the age of `domain`, consulting and updating `cache`.
    ///
    /// 1. A cached domain is returned as-is with no network access.
    /// 2. An empty domain stores and returns the sentinel with no network access.
    /// 3. Otherwise the service is queried; any failure yields the sentinel.
    ///
    /// Every new value, sentinel included, is written to the cache file before
    /// returning. A write failure is logged and reported through `persisted`.
    pub async fn resolve(&self, cache: &mut WhoisCache, domain: &str) -> AgeLookup {
        if let Some(age_days) = cache.get(domain) {
            log::debug!("WHOIS cache hit for {domain:?}: {age_days}");
            return AgeLookup {
                age_days,
                source: AgeSource::Cache,
                persisted: true,
            };
        }

        let outcome = if domain.is_empty() {
            Err(LookupFailure::DomainParse)
        } else {
            self.fetch_age_days(domain).await
        };

        let (age_days, source) = match outcome {
            Ok(days) => {
                log::info!("WHOIS age for {domain}: {days} days");
                (days as f64, AgeSource::Service)
            }
            Err(LookupFailure::DomainParse) => {
                log::debug!("Skipping WHOIS lookup for empty domain");
                (SENTINEL, AgeSource::Failed(FailureKind::DomainParse))
            }
            Err(failure) => {
                log::warn!("WHOIS lookup failed for {domain}: {failure}");
                (SENTINEL, AgeSource::Failed(failure.kind()))
            }
        };

        let persisted = match cache.put(domain, age_days) {
            Ok(()) => true,
            Err(e) => {
                log::error!("{e}");
                false
            }
        };

        AgeLookup {
            age_days,
            source,
            persisted,
        }
    }

    /// Queries the service and computes the age in whole days.
    async fn fetch_age_days(&self, domain: &str) -> Result<i64, LookupFailure> {
        let mut params: Vec<(&str, &str)> = Vec::with_capacity(3);
        if let Some(key) = self.api_key.as_deref() {
            params.push(("apiKey", key));
        }
        params.push(("domainName", domain));
        params.push(("outputFormat", "JSON"));

        log::debug!("Starting WHOIS lookup for domain: {domain}");
        let body = self
            .http
            .get(&self.endpoint)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| LookupFailure::Network(e.to_string()))?
            .text()
            .await
            .map_err(|e| LookupFailure::Network(e.to_string()))?;

        let created = parse_created_date(&body)?;
        Ok(whole_days_between(Utc::now(), created))
    }
}
