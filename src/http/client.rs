//! HTTP client setup and middleware configuration.
//!
//! Clients are built for probing, not for browsing: certificate verification is
//! off by default, redirects are only followed on request, and environment proxy
//! variables are ignored so that the configured proxy is the only one in play.
//!
//! # Examples
//!
//! ```rust
//! use pathprobe::http::{create_http_client, HttpClientConfig};
//! use pathprobe::proxy::ProxySpec;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig {
//!     pool_size: 8,
//!     proxy: Some(ProxySpec::parse("127.0.0.1:8080")),
//!     follow_redirects: true,
//!     verify_tls: false,
//! };
//!
//! let client = create_http_client(&config)?;
//! # Ok(())
//! # }
//! ```

use crate::proxy::ProxySpec;

use reqwest::redirect::Policy;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

/// Redirect hops followed before giving up with a redirect-limit failure.
pub const MAX_REDIRECTS: usize = 30;

/// Configuration for HTTP client setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Maximum idle connections kept per host.
    pub pool_size: usize,
    /// Optional proxy every request goes through.
    pub proxy: Option<ProxySpec>,
    /// Follow redirects, up to [`MAX_REDIRECTS`].
    pub follow_redirects: bool,
    /// Verify server certificates.
    pub verify_tls: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            pool_size: 1,
            proxy: None,
            follow_redirects: false,
            verify_tls: false,
        }
    }
}

/// Creates an HTTP client with middleware configuration.
///
/// This function sets up a reqwest client with:
/// - Tracing middleware for request/response logging
/// - A connection pool sized by `pool_size`
/// - The redirect and certificate policies from `config`
/// - Optional proxy support
///
/// Retries are not handled here; the requester drives them itself so that it can
/// tell failure categories apart.
pub fn create_http_client(
    config: &HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let redirect = if config.follow_redirects {
        Policy::limited(MAX_REDIRECTS)
    } else {
        Policy::none()
    };

    let mut inner_client_builder = reqwest::Client::builder()
        .pool_max_idle_per_host(config.pool_size)
        .redirect(redirect)
        .danger_accept_invalid_certs(!config.verify_tls);

    inner_client_builder = match config.proxy {
        Some(ref proxy) => inner_client_builder.proxy(proxy.to_reqwest()?),
        None => inner_client_builder.no_proxy(),
    };

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}
