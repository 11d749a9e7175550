//! Error handling for pathprobe.
//!
//! Configuration problems surface once, when a [`Requester`](crate::Requester) is
//! built, and are never retried. Request failures surface only after every attempt
//! of a call has been consumed, carrying the message of the last failed attempt.

use thiserror::Error;

/// Errors that can happen when using pathprobe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The target URL carries a scheme other than `http` or `https`.
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// The port segment of the target URL is not a valid port number.
    #[error("Invalid port number: {0}")]
    InvalidPort(String),

    /// The target host could not be resolved.
    ///
    /// Only raised when neither a fixed IP nor a proxy is configured.
    #[error("Couldn't resolve DNS: {0}")]
    Dns(String),

    /// The target URL cannot be used, e.g. it has no host.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Every attempt of a request failed.
    ///
    /// The message describes the last observed failure and the URL, proxy or
    /// endpoint involved.
    #[error("{0}")]
    Request(String),

    /// The TLS handshake kept failing after the hostname fallback was spent.
    #[error("{0}")]
    Tls(String),
}

impl Error {
    /// Whether this error was raised while building the requester.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedScheme(_)
                | Error::InvalidPort(_)
                | Error::Dns(_)
                | Error::InvalidUrl(_)
                | Error::InvalidConfig(_)
        )
    }
}

/// Result type alias for operations that can fail with a pathprobe error.
pub type Result<T> = std::result::Result<T, Error>;
