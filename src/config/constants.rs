//! Configuration constants.
//!
//! Timeouts, default paths and the column layout of the enriched table.

/// Value stored for any domain age or certificate lifetime that could not be measured.
///
/// A failed lookup is indistinguishable from an empty domain. A certificate that
/// expired within the last day also reports -1, which maps to the same invalid flag.
pub const SENTINEL: f64 = -1.0;

/// Environment variable holding the WhoisXML API key
pub const WHOIS_API_KEY_ENV: &str = "WHOISXML_API_KEY";

/// Default domain-age service endpoint
pub const DEFAULT_WHOIS_ENDPOINT: &str = "https://www.whoisxmlapi.com/whoisserver/WhoisService";

/// WHOIS HTTP request timeout in seconds
pub const WHOIS_TIMEOUT_SECS: u64 = 10;

/// TLS connect and handshake timeout in seconds (applied to each step)
pub const TLS_TIMEOUT_SECS: f64 = 5.0;

/// Port used for certificate inspection
pub const TLS_PORT: u16 = 443;

/// Default location of the persisted WHOIS age cache
pub const DEFAULT_CACHE_FILE: &str = ".whois_cache.json";

/// Default input table (output of URL lexical feature extraction)
pub const DEFAULT_INPUT_CSV: &str = "data/processed/features.csv";

/// Default enriched output table
pub const DEFAULT_OUTPUT_CSV: &str = "data/processed/features_with_network.csv";

/// Timestamp layout of `WhoisRecord.createdDate`
pub const WHOIS_CREATED_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// Input columns
pub const COLUMN_URL: &str = "url";
pub const COLUMN_LABEL: &str = "label";

// Enrichment columns, in output order
pub const COLUMN_DOMAIN: &str = "domain";
pub const COLUMN_DOMAIN_AGE_DAYS: &str = "domain_age_days";
pub const COLUMN_TLS_DAYS_VALID: &str = "tls_days_valid";
pub const COLUMN_TLS_VALID_FLAG: &str = "tls_valid_flag";

/// Columns appended to every input row.
pub const ENRICHMENT_COLUMNS: &[&str] = &[
    COLUMN_DOMAIN,
    COLUMN_DOMAIN_AGE_DAYS,
    COLUMN_TLS_DAYS_VALID,
    COLUMN_TLS_VALID_FLAG,
];
