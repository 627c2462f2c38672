//! Runtime configuration from environment variables.
//!
//! | variable                        | default        |
//! |---------------------------------|----------------|
//! | `STONEDESK_BIND_ADDR`           | `0.0.0.0:8080` |
//! | `STONEDESK_SUBMIT_DELAY_MS`     | `400`          |
//! | `STONEDESK_SEED_DEMO_DATA`      | `true`         |
//! | `STONEDESK_LOW_STOCK_THRESHOLD` | `5`            |
//! | `STONEDESK_LOG_FORMAT`          | `json`         |
//!
//! Unset variables take the default; set but unparsable ones are an error.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use stonedesk_observability::LogFormat;

pub const BIND_ADDR: &str = "STONEDESK_BIND_ADDR";
pub const SUBMIT_DELAY_MS: &str = "STONEDESK_SUBMIT_DELAY_MS";
pub const SEED_DEMO_DATA: &str = "STONEDESK_SEED_DEMO_DATA";
pub const LOW_STOCK_THRESHOLD: &str = "STONEDESK_LOW_STOCK_THRESHOLD";
pub const LOG_FORMAT: &str = "STONEDESK_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{var}={value:?} is invalid: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Artificial latency applied to login and form submissions.
    pub submit_delay: Duration,
    pub seed_demo_data: bool,
    /// Materials with fewer pieces than this are flagged as low stock.
    pub low_stock_threshold: u32,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            submit_delay: Duration::from_millis(400),
            seed_demo_data: true,
            low_stock_threshold: 5,
            log_format: LogFormat::Json,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            bind_addr: read(&lookup, BIND_ADDR, defaults.bind_addr, |v| {
                v.parse().map_err(|e: std::net::AddrParseError| e.to_string())
            })?,
            submit_delay: read(&lookup, SUBMIT_DELAY_MS, defaults.submit_delay, |v| {
                v.parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| e.to_string())
            })?,
            seed_demo_data: read(&lookup, SEED_DEMO_DATA, defaults.seed_demo_data, parse_bool)?,
            low_stock_threshold: read(&lookup, LOW_STOCK_THRESHOLD, defaults.low_stock_threshold, |v| {
                v.parse::<u32>().map_err(|e| e.to_string())
            })?,
            log_format: read(&lookup, LOG_FORMAT, defaults.log_format, |v| {
                v.parse::<LogFormat>().map_err(|e| e.to_string())
            })?,
        })
    }
}

fn read<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => parse(value.trim()).map_err(|reason| ConfigError { var, value, reason }),
    }
}

fn parse_bool(v: &str) -> Result<bool, String> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected true or false".to_string()),
    }
}
