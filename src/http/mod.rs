//! HTTP module containing the transport layer.
//!
//! This module provides client setup, the request header store, and the
//! [`Transport`] abstraction the requester performs its attempts through.
//!
//! # Overview
//!
//! - [`client`] - reqwest client creation and middleware configuration
//! - [`headers`] - the ordered, case-insensitive [`HeaderStore`]
//! - [`transport`] - the [`Transport`] trait, its failure categories and the
//!   reqwest-backed [`ReqwestTransport`]
//!
//! # Examples
//!
//! ## Implementing a Transport
//!
//! ```rust
//! use futures::future::BoxFuture;
//! use pathprobe::http::{Exchange, Transport, TransportFailure, TransportResponse};
//!
//! struct Offline;
//!
//! impl Transport for Offline {
//!     fn send(
//!         &self,
//!         exchange: Exchange,
//!     ) -> BoxFuture<'_, Result<TransportResponse, TransportFailure>> {
//!         Box::pin(async move { Err(TransportFailure::Connection(exchange.url)) })
//!     }
//! }
//! ```

pub mod client;
pub mod headers;
pub mod transport;

pub use client::{create_http_client, HttpClientConfig};
pub use headers::HeaderStore;
pub use transport::{
    Exchange, ReqwestTransport, Transport, TransportFailure, TransportResponse,
};
