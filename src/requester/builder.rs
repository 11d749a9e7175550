//! Builder pattern implementation for creating Requester instances.
//!
//! # Examples
//!
//! ## Basic Builder Usage
//!
//! ```rust,no_run
//! use pathprobe::requester::RequesterBuilder;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), pathprobe::Error> {
//! let requester = RequesterBuilder::new("example.com")
//!     .max_retries(3)
//!     .timeout(Duration::from_secs(5))
//!     .redirect(true)
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Rotating Proxies and User-Agents
//!
//! ```rust
//! use pathprobe::requester::RequesterBuilder;
//!
//! # async fn example() -> Result<(), pathprobe::Error> {
//! let requester = RequesterBuilder::new("https://example.com/")
//!     .proxy_list(["10.0.0.1:3128", "socks5://10.0.0.2:1080"])
//!     .random_agents(["Mozilla/5.0 (X11; Linux x86_64)", "curl/8.5.0"])
//!     .header("Accept", "*/*")
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use super::{config::RequesterConfig, requester::Requester};
use crate::error::Result;
use crate::http::Transport;
use crate::target::Scheme;

use reqwest::Method;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

/// A builder used to create a [`Requester`].
#[derive(Default)]
pub struct RequesterBuilder {
    config: RequesterConfig,
    headers: Vec<(String, String)>,
    random_agents: Option<Vec<String>>,
    transport: Option<Arc<dyn Transport>>,
}

impl RequesterBuilder {
    /// Creates a builder targeting `url` with the default options.
    pub fn new(url: impl Into<String>) -> Self {
        let mut builder = RequesterBuilder::default();
        builder.config.url = url.into();
        builder
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: RequesterConfig) -> Self {
        Self {
            config,
            ..RequesterBuilder::default()
        }
    }

    /// Set the number of idle connections kept per host.
    pub fn max_pool(mut self, max_pool: usize) -> Self {
        self.config.max_pool = max_pool;
        self
    }

    /// Set the number of attempts per request.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the timeout of a single attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Send requests to this IP instead of resolving the host.
    pub fn ip(mut self, ip: IpAddr) -> Self {
        self.config.ip = Some(ip);
        self
    }

    /// Route requests through a single proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Rotate requests randomly across these proxies.
    pub fn proxy_list<I, S>(mut self, proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.proxy_list = proxies.into_iter().map(Into::into).collect();
        self
    }

    /// Follow redirects.
    pub fn redirect(mut self, redirect: bool) -> Self {
        self.config.redirect = redirect;
        self
    }

    /// Build request URLs from the host name instead of the resolved IP.
    pub fn request_by_hostname(mut self, by_hostname: bool) -> Self {
        self.config.request_by_hostname = by_hostname;
        self
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.config.method = method;
        self
    }

    /// Set the body sent with every request.
    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.config.data = Some(data.into());
        self
    }

    /// Set the scheme assumed when the URL has none.
    pub fn default_scheme(mut self, scheme: Scheme) -> Self {
        self.config.default_scheme = scheme;
        self
    }

    /// Add a header, applied after the automatic `Host` header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Pick a random `User-Agent` from `agents` on each attempt.
    pub fn random_agents<I, S>(mut self, agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.random_agents = Some(agents.into_iter().map(Into::into).collect());
        self
    }

    /// Perform exchanges through a custom transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn config(&self) -> &RequesterConfig {
        &self.config
    }

    /// Create the [`Requester`], normalizing and resolving the target.
    pub async fn build(self) -> Result<Requester> {
        let mut requester = match self.transport {
            Some(transport) => Requester::with_transport(self.config, transport).await?,
            None => Requester::new(self.config).await?,
        };

        for (key, value) in &self.headers {
            requester.set_header(key, value);
        }
        if let Some(agents) = self.random_agents {
            requester.set_random_agents(agents);
        }

        Ok(requester)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = RequesterBuilder::new("example.com");
        let config = builder.config();
        assert_eq!(config.url, "example.com");
        assert_eq!(config, &RequesterConfig {
            url: "example.com".into(),
            ..RequesterConfig::default()
        });
    }

    #[test]
    fn test_builder_configuration() {
        let builder = RequesterBuilder::new("https://example.com/")
            .max_pool(16)
            .max_retries(2)
            .timeout(Duration::from_secs(3))
            .ip(IpAddr::from([10, 0, 0, 1]))
            .proxy("127.0.0.1:8080")
            .proxy_list(["a:1", "b:2"])
            .redirect(true)
            .request_by_hostname(true)
            .method(Method::POST)
            .data("q=1")
            .default_scheme(Scheme::Https);

        let config = builder.config();
        assert_eq!(config.max_pool, 16);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.ip, Some(IpAddr::from([10, 0, 0, 1])));
        assert_eq!(config.proxy.as_deref(), Some("127.0.0.1:8080"));
        assert_eq!(config.proxy_list, vec!["a:1".to_string(), "b:2".to_string()]);
        assert!(config.redirect);
        assert!(config.request_by_hostname);
        assert_eq!(config.method, Method::POST);
        assert_eq!(config.data.as_deref(), Some(&b"q=1"[..]));
        assert_eq!(config.default_scheme, Scheme::Https);
    }

    #[tokio::test]
    async fn test_build_rejects_invalid_config() {
        let result = RequesterBuilder::new("http://127.0.0.1/")
            .max_retries(0)
            .build()
            .await;
        assert!(matches!(result, Err(crate::Error::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_build_applies_headers_after_host() {
        let requester = RequesterBuilder::new("http://127.0.0.1:8000/")
            .header("Host", "vhost.local")
            .header("X-Scan", "1")
            .build()
            .await
            .unwrap();

        assert_eq!(requester.headers().get("Host"), Some("vhost.local"));
        assert_eq!(requester.headers().get("X-Scan"), Some("1"));
    }
}
