//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

/// User-Agent sent to the domain-age service
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Initializes the HTTP client used for WHOIS lookups.
///
/// Creates a `reqwest::Client` configured with:
/// - A crate-identifying User-Agent header
/// - `timeout` as the overall per-request timeout
/// - Rustls TLS backend (no native TLS)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client() {
        assert!(init_client(Duration::from_secs(10)).is_ok());
    }

    #[test]
    fn test_user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("phish_enrich/"));
    }
}
