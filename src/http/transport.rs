//! The transport seam between the requester and the network.
//!
//! A [`Transport`] performs exactly one physical exchange and reports its outcome
//! as either a [`TransportResponse`] or one [`TransportFailure`] out of a closed
//! set of categories. The requester's retry logic only ever matches on those
//! categories.

use super::client::{create_http_client, HttpClientConfig};
use super::headers::HeaderStore;
use crate::proxy::ProxySpec;

use futures::future::BoxFuture;
use reqwest::{header::HeaderMap, Method, StatusCode};
use reqwest_middleware::ClientWithMiddleware;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Everything needed to perform one physical request.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub method: Method,
    pub url: String,
    /// Header snapshot taken for this attempt.
    pub headers: HeaderStore,
    pub body: Option<Vec<u8>>,
    pub proxy: Option<ProxySpec>,
    pub timeout: Duration,
    pub follow_redirects: bool,
    pub verify_tls: bool,
}

/// A completed exchange as returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Why an exchange failed.
///
/// Each variant carries a free-form detail used for logging only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    #[error("TLS handshake failed: {0}")]
    Tls(String),
    /// Connect or read timeout, or a body cut short.
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("proxy failed: {0}")]
    Proxy(String),
    #[error("too many redirects: {0}")]
    RedirectLimit(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid proxy URL: {0}")]
    InvalidProxyUrl(String),
    #[error("{0}")]
    Other(String),
}

/// Performs single HTTP exchanges on behalf of a requester.
pub trait Transport: Send + Sync {
    fn send(&self, exchange: Exchange) -> BoxFuture<'_, Result<TransportResponse, TransportFailure>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    proxy: Option<ProxySpec>,
    follow_redirects: bool,
    verify_tls: bool,
}

/// [`Transport`] backed by reqwest.
///
/// reqwest binds proxies and redirect policies to a client, so one client is kept
/// per combination in use. Clients share nothing but are each pooled.
#[derive(Debug)]
pub struct ReqwestTransport {
    pool_size: usize,
    clients: Mutex<HashMap<ClientKey, ClientWithMiddleware>>,
}

impl ReqwestTransport {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    fn client_for(&self, exchange: &Exchange) -> Result<ClientWithMiddleware, TransportFailure> {
        let key = ClientKey {
            proxy: exchange.proxy.clone(),
            follow_redirects: exchange.follow_redirects,
            verify_tls: exchange.verify_tls,
        };

        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = clients.get(&key) {
            return Ok(client.clone());
        }

        if let Some(ref proxy) = key.proxy {
            proxy
                .to_reqwest()
                .map_err(|e| TransportFailure::InvalidProxyUrl(format!("{}: {}", proxy, e)))?;
        }

        debug!("Creating HTTP client for {:?}", key);
        let client = create_http_client(&HttpClientConfig {
            pool_size: self.pool_size,
            proxy: key.proxy.clone(),
            follow_redirects: key.follow_redirects,
            verify_tls: key.verify_tls,
        })
        .map_err(|e| TransportFailure::Other(error_chain(&e)))?;

        clients.insert(key, client.clone());
        Ok(client)
    }

    async fn exchange(&self, exchange: Exchange) -> Result<TransportResponse, TransportFailure> {
        let client = self.client_for(&exchange)?;
        let headers = exchange
            .headers
            .to_header_map()
            .map_err(TransportFailure::Other)?;
        let via_proxy = exchange.proxy.is_some();

        let mut request = client
            .request(exchange.method, exchange.url.as_str())
            .headers(headers)
            .timeout(exchange.timeout);
        if let Some(body) = exchange.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| classify(&e, via_proxy))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| classify_reqwest(&e, via_proxy))?;

        Ok(TransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, exchange: Exchange) -> BoxFuture<'_, Result<TransportResponse, TransportFailure>> {
        Box::pin(self.exchange(exchange))
    }
}

/// Map a middleware-stack error onto a failure category.
pub fn classify(error: &reqwest_middleware::Error, via_proxy: bool) -> TransportFailure {
    match error {
        reqwest_middleware::Error::Reqwest(e) => classify_reqwest(e, via_proxy),
        reqwest_middleware::Error::Middleware(e) => TransportFailure::Other(format!("{:#}", e)),
    }
}

/// Map a reqwest error onto a failure category.
///
/// reqwest reports TLS handshake problems as connect errors, so the error chain is
/// inspected before the connect check.
pub fn classify_reqwest(error: &reqwest::Error, via_proxy: bool) -> TransportFailure {
    let detail = error_chain(error);

    if error.is_redirect() {
        TransportFailure::RedirectLimit(detail)
    } else if error.is_timeout() {
        TransportFailure::Timeout(detail)
    } else if error.is_builder() {
        TransportFailure::InvalidUrl(detail)
    } else if is_tls_failure(error) {
        TransportFailure::Tls(detail)
    } else if error.is_connect() && via_proxy {
        TransportFailure::Proxy(detail)
    } else if error.is_connect() {
        TransportFailure::Connection(detail)
    } else if error.is_body() || error.is_decode() {
        TransportFailure::Timeout(detail)
    } else if error.is_request() {
        TransportFailure::Connection(detail)
    } else {
        TransportFailure::Other(detail)
    }
}

/// Whether anything below the top-level error points at TLS.
///
/// The top level is skipped: it embeds the request URL, which may contain any
/// word at all.
fn is_tls_failure(error: &reqwest::Error) -> bool {
    const MARKERS: [&str; 6] = [
        "tls",
        "ssl",
        "certificate",
        "handshake",
        "wrong version number",
        "corrupt message",
    ];

    let mut source = error.source();
    while let Some(inner) = source {
        let message = inner.to_string().to_ascii_lowercase();
        if MARKERS.iter().any(|marker| message.contains(marker)) {
            return true;
        }
        source = inner.source();
    }
    false
}

fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
