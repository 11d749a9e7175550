//! Core requester implementation with the retry loop.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pathprobe::requester::RequesterBuilder;
//!
//! # async fn example() -> Result<(), pathprobe::Error> {
//! let requester = RequesterBuilder::new("https://example.com/app/")
//!     .max_retries(3)
//!     .build()
//!     .await?;
//!
//! let response = requester.request("admin/", None).await?;
//! println!("{} {} ({} bytes)", response.status(), response.reason(), response.length());
//! # Ok(())
//! # }
//! ```

use super::attempt::{exhausted, settle, AttemptContext, AttemptState};
use super::config::RequesterConfig;
use super::fallback::TlsFallback;
use crate::error::Result;
use crate::http::{Exchange, HeaderStore, ReqwestTransport, Transport};
use crate::proxy::ProxySelector;
use crate::response::Response;
use crate::target::{normalize, Target};

use rand::seq::IndexedRandom;
use reqwest::{header::USER_AGENT, Method};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Sends requests for paths below one fixed target.
///
/// A requester is built once and shared, typically behind an `Arc`, by every
/// worker of a scan. [`request`](Self::request) only needs `&self`; changing the
/// configuration needs `&mut self`, so it happens before sharing or under the
/// caller's own lock.
pub struct Requester {
    target: Target,
    headers: HeaderStore,
    random_agents: Option<Vec<String>>,
    proxies: ProxySelector,
    max_pool: usize,
    max_retries: u32,
    timeout: Duration,
    redirect: bool,
    request_by_hostname: bool,
    method: Method,
    data: Option<Vec<u8>>,
    fallback: TlsFallback,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requester")
            .field("target", &self.target)
            .field("headers", &self.headers)
            .field("random_agents", &self.random_agents)
            .field("proxies", &self.proxies)
            .field("max_pool", &self.max_pool)
            .field("max_retries", &self.max_retries)
            .field("timeout", &self.timeout)
            .field("redirect", &self.redirect)
            .field("request_by_hostname", &self.request_by_hostname)
            .field("method", &self.method)
            .field("data", &self.data.as_ref().map(Vec::len))
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Requester {
    /// Creates a requester using the reqwest transport.
    pub async fn new(config: RequesterConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.max_pool));
        Self::with_transport(config, transport).await
    }

    /// Creates a requester performing its exchanges through `transport`.
    pub async fn with_transport(
        config: RequesterConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        config.validate()?;

        let proxies = ProxySelector::new(config.proxy, config.proxy_list);
        let target = normalize(
            &config.url,
            config.default_scheme,
            config.ip,
            proxies.is_configured(),
        )
        .await?;

        let mut headers = HeaderStore::new();
        headers.set("Host", &target.host_header());

        let fallback = TlsFallback::new(!config.request_by_hostname && target.ip().is_some());
        debug!(
            "Requester bound to {} (ip: {:?}, base path: {:?})",
            target.url(),
            target.ip(),
            target.base_path()
        );

        Ok(Self {
            target,
            headers,
            random_agents: None,
            proxies,
            max_pool: config.max_pool,
            max_retries: config.max_retries,
            timeout: config.timeout,
            redirect: config.redirect,
            request_by_hostname: config.request_by_hostname,
            method: config.method,
            data: config.data,
            fallback,
            transport,
        })
    }

    /// Set a header sent with every request, replacing any previous value.
    ///
    /// This also overrides the automatic `Host` header.
    pub fn set_header(&mut self, key: &str, value: &str) {
        self.headers.set(key, value);
    }

    /// Send a random one of `agents` as `User-Agent` on each attempt.
    pub fn set_random_agents<I, S>(&mut self, agents: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.random_agents = Some(agents.into_iter().map(Into::into).collect());
    }

    pub fn unset_random_agents(&mut self) {
        self.random_agents = None;
    }

    /// Request `path`, relative to the target's base path.
    ///
    /// `proxy` pins the proxy for this call; otherwise one is picked from the
    /// configured proxies and kept for every attempt of the call. Up to
    /// `max_retries` attempts are made. The first response of any status is
    /// returned; if none arrives, the failure of the last attempt is.
    pub async fn request(&self, path: &str, proxy: Option<&str>) -> Result<Response> {
        let proxy = self.proxies.select(proxy);
        let mut pending = None;
        let mut url = String::new();

        for attempt in 1..=self.max_retries {
            url = format!("{}{}{}", self.base_url(), self.target.base_path(), path);
            debug!("Attempt {}/{}: {} {}", attempt, self.max_retries, self.method, url);

            let exchange = Exchange {
                method: self.method.clone(),
                url: url.clone(),
                headers: self.attempt_headers(),
                body: self.data.clone(),
                proxy: proxy.clone(),
                timeout: self.timeout,
                follow_redirects: self.redirect,
                verify_tls: false,
            };
            let outcome = self.transport.send(exchange).await;

            let context = AttemptContext {
                url: &url,
                proxy: proxy.as_ref(),
                host: self.target.host(),
                port: self.target.port(),
            };
            match settle(outcome, &context, &self.fallback) {
                AttemptState::Succeeded(response) => return Ok(response),
                AttemptState::Downgraded => {
                    debug!("TLS handshake failed, retrying against {}", self.base_url());
                }
                AttemptState::Retrying(error) => {
                    warn!("Attempt {}/{} failed: {}", attempt, self.max_retries, error);
                    pending = Some(error);
                }
            }
        }

        let error = exhausted(pending, &url);
        warn!("Giving up after {} attempts: {}", self.max_retries, error);
        Err(error)
    }

    /// Header snapshot for one attempt, with a fresh random agent if configured.
    fn attempt_headers(&self) -> HeaderStore {
        let mut headers = self.headers.clone();
        if let Some(agent) = self
            .random_agents
            .as_deref()
            .and_then(|agents| agents.choose(&mut rand::rng()))
        {
            headers.set(USER_AGENT.as_str(), agent);
        }
        headers
    }

    /// Base URL requests are currently built on.
    ///
    /// Hostname-based once the TLS fallback has been spent.
    pub fn base_url(&self) -> String {
        self.target.base_url(!self.fallback.is_armed())
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    pub fn random_agents(&self) -> Option<&[String]> {
        self.random_agents.as_deref()
    }

    pub fn proxies(&self) -> &ProxySelector {
        &self.proxies
    }

    pub fn max_pool(&self) -> usize {
        self.max_pool
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn redirect(&self) -> bool {
        self.redirect
    }

    pub fn request_by_hostname(&self) -> bool {
        self.request_by_hostname
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }
}
