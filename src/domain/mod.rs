//! Hostname extraction from URL strings.
//!
//! The extracted host is what gets queried: it is the WHOIS cache key and the
//! TLS connection target. Unlike registrable-domain extraction, subdomains are
//! kept (`login.example.com` stays `login.example.com`).

use url::{Host, ParseError, Url};

/// Extracts the hostname from a URL.
///
/// # Arguments
///
/// * `url` - The URL to extract the host from
///
/// # Returns
///
/// The lowercase hostname (e.g., "www.example.com" from "https://WWW.Example.com:8443/path"),
/// or an empty string if the URL cannot be parsed or has no host component.
/// IP literals are returned without brackets. Internationalized names come back
/// in their ASCII (punycode) form. A port that is out of range or not numeric
/// does not hide the host: `http://example.com:99999/` yields `example.com`.
pub fn extract_host(url: &str) -> String {
    let url = url.trim();
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(ParseError::InvalidPort) => match strip_port(url).map(|u| Url::parse(&u)) {
            Some(Ok(parsed)) => parsed,
            _ => {
                log::debug!("No host in {url:?}: invalid port");
                return String::new();
            }
        },
        Err(e) => {
            log::debug!("No host in {url:?}: {e}");
            return String::new();
        }
    };

    match parsed.host() {
        Some(Host::Domain(domain)) => domain.to_ascii_lowercase(),
        Some(Host::Ipv4(ip)) => ip.to_string(),
        Some(Host::Ipv6(ip)) => ip.to_string(),
        None => String::new(),
    }
}

/// Rewrites `scheme://[userinfo@]host:port/rest` as `scheme://host/rest`.
fn strip_port(url: &str) -> Option<String> {
    let (scheme, rest) = url.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(end);

    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    let host = if host_port.starts_with('[') {
        &host_port[..=host_port.find(']')?]
    } else {
        host_port.split_once(':').map_or(host_port, |(host, _)| host)
    };

    Some(format!("{scheme}://{host}{tail}"))
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
