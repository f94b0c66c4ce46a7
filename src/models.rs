use csv::StringRecord;
use strum_macros::{Display, EnumString};

/// Class label of a URL record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Label {
    Phish,
    Legit,
}

/// One input row: the fields the enrichment needs plus every original column.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    pub url: String,
    pub label: Label,
    /// All columns of the row as read, in header order
    pub fields: StringRecord,
}

/// An input row with its network-derived features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub url: String,
    pub label: Label,
    /// Hostname of `url`, empty when it has none
    pub domain: String,
    /// Domain registration age in whole days, or the sentinel
    pub domain_age_days: f64,
    /// Whole days until the certificate expires, or the sentinel
    pub tls_days_valid: f64,
    /// 1 when `tls_days_valid > 0`, else 0
    pub tls_valid_flag: u8,
    /// Original columns, written back unchanged
    pub passthrough: StringRecord,
}
