//! Configuration structures and defaults for the requester.
//!
//! # Examples
//!
//! ```rust
//! use pathprobe::requester::RequesterConfig;
//! use std::time::Duration;
//!
//! let config = RequesterConfig {
//!     url: "https://example.com/app/".into(),
//!     max_retries: 3,
//!     timeout: Duration::from_secs(5),
//!     proxy_list: vec!["127.0.0.1:8080".into(), "socks5://127.0.0.1:1080".into()],
//!     ..RequesterConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{Error, Result};
use crate::target::Scheme;

use reqwest::Method;
use std::net::IpAddr;
use std::time::Duration;

/// Configuration structure for the requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequesterConfig {
    /// Target URL every request path is appended to.
    pub url: String,
    /// Idle connections kept per host by the transport.
    pub max_pool: usize,
    /// Physical attempts per request.
    pub max_retries: u32,
    /// Timeout of a single attempt.
    pub timeout: Duration,
    /// Fixed IP to send requests to, bypassing DNS.
    pub ip: Option<IpAddr>,
    /// Proxy used when no proxy list is configured.
    pub proxy: Option<String>,
    /// Proxies rotated randomly, one per request.
    pub proxy_list: Vec<String>,
    /// Follow redirects.
    pub redirect: bool,
    /// Build request URLs from the host name rather than the resolved IP.
    pub request_by_hostname: bool,
    /// HTTP method of every request.
    pub method: Method,
    /// Body sent with every request.
    pub data: Option<Vec<u8>>,
    /// Scheme assumed when the URL has none.
    pub default_scheme: Scheme,
}

impl Default for RequesterConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_pool: 1,
            max_retries: 5,
            timeout: Duration::from_secs(20),
            ip: None,
            proxy: None,
            proxy_list: Vec::new(),
            redirect: false,
            request_by_hostname: false,
            method: Method::GET,
            data: None,
            default_scheme: Scheme::Http,
        }
    }
}

impl RequesterConfig {
    /// Check the values that cannot be caught by URL normalization.
    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(Error::InvalidConfig(
                "max_retries must be at least 1".to_string(),
            ));
        }
        if self.max_pool == 0 {
            return Err(Error::InvalidConfig("max_pool must be at least 1".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must not be zero".to_string()));
        }
        Ok(())
    }
}
