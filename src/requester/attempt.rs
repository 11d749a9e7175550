//! Settling the outcome of a single attempt.

use super::fallback::TlsFallback;
use crate::error::Error;
use crate::http::{TransportFailure, TransportResponse};
use crate::proxy::ProxySpec;
use crate::response::Response;

/// Where a request stands after one attempt.
#[derive(Debug)]
pub(crate) enum AttemptState {
    /// The exchange completed; the call is over.
    Succeeded(Response),
    /// The TLS fallback was spent; retry against the host name.
    Downgraded,
    /// The attempt failed; retry if attempts remain, else fail with this error.
    Retrying(Error),
}

/// What an attempt was sent to, for wording its failure.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AttemptContext<'a> {
    pub url: &'a str,
    pub proxy: Option<&'a ProxySpec>,
    pub host: &'a str,
    pub port: u16,
}

impl AttemptContext<'_> {
    /// Describe a failure the way it is surfaced to callers.
    pub fn describe(&self, failure: &TransportFailure) -> Error {
        let proxy = self.proxy.map_or("<none>", ProxySpec::url);
        match failure {
            TransportFailure::Tls(_) => Error::Tls(format!("TLS handshake failed: {}", self.url)),
            TransportFailure::RedirectLimit(_) => {
                Error::Request(format!("Too many redirects: {}", self.url))
            }
            TransportFailure::Proxy(_) => Error::Request(format!("Error with the proxy: {}", proxy)),
            TransportFailure::Connection(_) => {
                Error::Request(format!("Cannot connect to: {}:{}", self.host, self.port))
            }
            TransportFailure::InvalidUrl(_) => Error::Request(format!("Invalid URL: {}", self.url)),
            TransportFailure::InvalidProxyUrl(_) => {
                Error::Request(format!("Invalid proxy URL: {}", proxy))
            }
            TransportFailure::Timeout(_) => Error::Request(format!("Request timeout: {}", self.url)),
            TransportFailure::Other(_) => Error::Request(format!(
                "There was a problem in the request to: {}",
                self.url
            )),
        }
    }
}

/// Turn a transport outcome into the next state of the request.
pub(crate) fn settle(
    outcome: Result<TransportResponse, TransportFailure>,
    context: &AttemptContext<'_>,
    fallback: &TlsFallback,
) -> AttemptState {
    match outcome {
        Ok(raw) => AttemptState::Succeeded(Response::from(raw)),
        Err(TransportFailure::Tls(_)) if fallback.trigger() => AttemptState::Downgraded,
        Err(failure) => AttemptState::Retrying(context.describe(&failure)),
    }
}

/// The error a request ends with once its attempts are used up.
///
/// Without a pending error every attempt went into the TLS fallback, which is
/// reported as a TLS failure on the last URL tried.
pub(crate) fn exhausted(pending: Option<Error>, last_url: &str) -> Error {
    pending.unwrap_or_else(|| Error::Tls(format!("TLS handshake failed: {}", last_url)))
}
