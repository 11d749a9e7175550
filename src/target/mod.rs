//! Target module: validation and decomposition of the URL a requester is bound to.
//!
//! # Examples
//!
//! ```rust
//! use pathprobe::target::{Scheme, Target};
//!
//! let target = Target::parse("https://example.com:8443/admin", Scheme::Http)?;
//! assert_eq!(target.scheme(), Scheme::Https);
//! assert_eq!(target.host_header(), "example.com:8443");
//! assert_eq!(target.base_path(), "admin/");
//! assert_eq!(target.base_url(true), "https://example.com:8443/");
//! # Ok::<(), pathprobe::Error>(())
//! ```

pub mod encode;
pub mod normalize;

pub use encode::encode_base_path;
pub use normalize::{normalize, Scheme, Target};
