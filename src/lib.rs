//! pathprobe is the HTTP request engine of a content-discovery scanner: it probes
//! many paths against one fixed target, retrying, rotating proxies and falling
//! back from IP-based to hostname-based TLS as needed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pathprobe::{Error, RequesterBuilder};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let mut requester = RequesterBuilder::new("https://example.com/app")
//!     .max_retries(3)
//!     .build()
//!     .await?;
//! requester.set_header("Accept", "*/*");
//!
//! let response = requester.request(".env", None).await?;
//! println!("{} {}", response.status(), response.length());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`target`] - URL validation, decomposition and DNS pinning
//! - [`proxy`] - proxy selection, rotation and normalization
//! - [`http`] - header store, HTTP client setup and the [`Transport`] seam
//! - [`requester`] - the [`Requester`], its builder and its retry loop
//! - [`response`] - the captured [`Response`]
//! - [`error`] - centralized error handling with the [`Error`] enum

pub mod error;
pub mod http;
pub mod proxy;
pub mod requester;
pub mod response;
pub mod target;

pub use error::{Error, Result};
pub use http::{
    create_http_client, Exchange, HeaderStore, HttpClientConfig, ReqwestTransport, Transport,
    TransportFailure, TransportResponse,
};
pub use proxy::{ProxyScheme, ProxySelector, ProxySpec};
pub use requester::{Requester, RequesterBuilder, RequesterConfig};
pub use response::Response;
pub use target::{normalize, Scheme, Target};
