//! Requester module containing the retry loop, builder pattern, and configuration.
//!
//! This module provides the main [`Requester`] struct and its builder. A requester
//! is bound to one target and turns every `request(path)` call into up to
//! `max_retries` physical attempts, with proxy rotation, random user agents and a
//! one-shot TLS fallback.
//!
//! # Overview
//!
//! - `requester` - the Requester struct and its attempt loop
//! - `builder` - RequesterBuilder for configuration using the builder pattern
//! - `config` - configuration structure and defaults
//! - `attempt` - how the outcome of one attempt moves a request forward
//! - `fallback` - the one-shot switch to hostname-based URLs
//!
//! # Examples
//!
//! ## Sharing a Requester Between Workers
//!
//! ```rust,no_run
//! use pathprobe::requester::RequesterBuilder;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), pathprobe::Error> {
//! let requester = Arc::new(
//!     RequesterBuilder::new("https://example.com/")
//!         .max_pool(8)
//!         .build()
//!         .await?,
//! );
//!
//! let mut workers = Vec::new();
//! for path in ["admin/", "login", ".git/HEAD"] {
//!     let requester = Arc::clone(&requester);
//!     workers.push(tokio::spawn(async move { requester.request(path, None).await }));
//! }
//! for worker in workers {
//!     if let Ok(Ok(response)) = worker.await {
//!         println!("{}", response.status());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod attempt;
pub mod builder;
pub mod config;
pub mod fallback;
#[allow(clippy::module_inception)]
pub mod requester;

pub use builder::RequesterBuilder;
pub use config::RequesterConfig;
pub use fallback::TlsFallback;
pub use requester::Requester;
