//! Captured responses.
//!
//! A [`Response`] is the immutable result of one successful exchange. It owns its
//! data and is independent of the transport that produced it.
//!
//! # Examples
//!
//! ```rust
//! use pathprobe::Response;
//! use reqwest::header::{HeaderMap, HeaderValue, LOCATION};
//! use reqwest::StatusCode;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(LOCATION, HeaderValue::from_static("/login/"));
//!
//! let response = Response::new(StatusCode::FOUND, headers, b"moved".to_vec());
//! assert_eq!(response.status(), 302);
//! assert_eq!(response.reason(), "Found");
//! assert_eq!(response.redirect(), Some("/login/"));
//! assert_eq!(response.length(), 5);
//! ```

use crate::http::TransportResponse;

use reqwest::header::{HeaderMap, LOCATION};
use reqwest::StatusCode;
use std::borrow::Cow;

/// Status, headers and body of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    reason: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    /// Capture a response; the reason phrase is the canonical one for `status`.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        }
    }

    /// Numeric status code.
    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Reason phrase, empty for non-standard codes.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Body size in bytes.
    pub fn length(&self) -> usize {
        self.body.len()
    }

    /// Body decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Target of a redirect, if the response carries a readable `Location` header.
    pub fn redirect(&self) -> Option<&str> {
        self.headers
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

impl From<TransportResponse> for Response {
    fn from(raw: TransportResponse) -> Self {
        Self::new(raw.status, raw.headers, raw.body)
    }
}
