//! Runtime configuration
//!
//! All knobs have fixed defaults matching the public web3.bio deployment;
//! the environment overrides them (`DATA_API_URL`, `ACCESS_TOKEN`, `PORT`).

use std::env;
use std::time::Duration;

/// Default upstream identity-graph GraphQL endpoint
pub const DEFAULT_ENDPOINT: &str = "https://graph.web3.bio/graphql";

/// Default HTTP transport bind port
pub const DEFAULT_PORT: u16 = 3000;

/// Hard deadline for a single upstream query
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum age of a cached lookup result
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Interval between proactive cache sweeps; shorter than the TTL so entries
/// that are never read again still get reclaimed
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(3 * 60);

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream GraphQL endpoint URL
    pub endpoint: String,

    /// Optional Authorization header value for the upstream API, sent verbatim
    pub access_token: Option<String>,

    /// Bind port for the streamable-HTTP transport
    pub port: u16,

    /// Per-request upstream timeout
    pub request_timeout: Duration,

    /// Cache entry time-to-live
    pub cache_ttl: Duration,

    /// Background sweep interval
    pub sweep_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token: None,
            port: DEFAULT_PORT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl Config {
    /// Build a config from the process environment
    ///
    /// Unset or unparseable variables fall back to the defaults; an empty
    /// `ACCESS_TOKEN` counts as absent.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("DATA_API_URL") {
            if !url.trim().is_empty() {
                config.endpoint = url;
            }
        }

        config.access_token = env::var("ACCESS_TOKEN").ok().filter(|t| !t.is_empty());

        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }

        config
    }
}
