//! Configuration types and CLI options.
//!
//! `Opt` is the clap-facing surface used by the binary; `Config` is the library
//! configuration and can be built programmatically without any CLI involvement.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CACHE_FILE, DEFAULT_INPUT_CSV, DEFAULT_OUTPUT_CSV, DEFAULT_WHOIS_ENDPOINT,
    TLS_TIMEOUT_SECS, WHOIS_API_KEY_ENV, WHOIS_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: One JSON object per line for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options for the `phish-enrich` binary.
#[derive(Debug, Parser)]
#[command(
    name = "phish-enrich",
    version,
    about = "Adds WHOIS domain age and TLS certificate freshness columns to a URL feature table"
)]
pub struct Opt {
    /// CSV table with at least `url` and `label` columns
    #[arg(default_value = DEFAULT_INPUT_CSV)]
    pub input: PathBuf,

    /// Where to write the enriched table
    #[arg(short, long, default_value = DEFAULT_OUTPUT_CSV)]
    pub output: PathBuf,

    /// Persistent WHOIS age cache (JSON object of domain -> days)
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: PathBuf,

    /// WhoisXML API key
    #[arg(long, env = WHOIS_API_KEY_ENV, hide_env_values = true)]
    pub whois_api_key: Option<String>,

    /// Domain-age service endpoint
    #[arg(long, default_value = DEFAULT_WHOIS_ENDPOINT)]
    pub whois_endpoint: String,

    /// WHOIS request timeout in seconds
    #[arg(long, default_value_t = WHOIS_TIMEOUT_SECS)]
    pub whois_timeout_secs: u64,

    /// TLS connect/handshake timeout in seconds
    #[arg(long, default_value_t = TLS_TIMEOUT_SECS)]
    pub tls_timeout_secs: f64,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use phish_enrich::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: PathBuf::from("features.csv"),
///     whois_api_key: Some("key".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Input CSV table
    pub input: PathBuf,

    /// Output CSV table
    pub output: PathBuf,

    /// WHOIS age cache file
    pub cache_file: PathBuf,

    /// API credential for the domain-age service
    pub whois_api_key: Option<String>,

    /// Domain-age service endpoint
    pub whois_endpoint: String,

    /// WHOIS request timeout in seconds
    pub whois_timeout_secs: u64,

    /// TLS connect/handshake timeout in seconds
    pub tls_timeout_secs: f64,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_CSV),
            output: PathBuf::from(DEFAULT_OUTPUT_CSV),
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            whois_api_key: None,
            whois_endpoint: DEFAULT_WHOIS_ENDPOINT.to_string(),
            whois_timeout_secs: WHOIS_TIMEOUT_SECS,
            tls_timeout_secs: TLS_TIMEOUT_SECS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            input: opt.input,
            output: opt.output,
            cache_file: opt.cache_file,
            // An empty variable (e.g. `WHOISXML_API_KEY=` in .env) counts as unset
            whois_api_key: opt.whois_api_key.filter(|key| !key.trim().is_empty()),
            whois_endpoint: opt.whois_endpoint,
            whois_timeout_secs: opt.whois_timeout_secs,
            tls_timeout_secs: opt.tls_timeout_secs,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}
