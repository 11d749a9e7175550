//! Proxy module: selection, rotation and normalization of proxies.
//!
//! - [`selector`] - resolves which proxy a call goes through
//! - [`spec`] - normalized proxy URLs and their transport mapping

pub mod selector;
pub mod spec;

pub use selector::ProxySelector;
pub use spec::{ProxyScheme, ProxySpec};
