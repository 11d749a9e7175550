//! One-shot TLS fallback.
//!
//! A handshake against a bare IP address can fail where the same handshake
//! against the host name succeeds (SNI, virtual hosting). The first TLS failure
//! seen by a requester therefore switches its base URL to the host name for good.
//! Later TLS failures are ordinary failures.

use std::sync::atomic::{AtomicBool, Ordering};

/// Armed until the first TLS failure, spent afterwards.
#[derive(Debug)]
pub struct TlsFallback {
    armed: AtomicBool,
}

impl TlsFallback {
    /// A fallback that is only armed if requests currently go to an IP address.
    pub fn new(armed: bool) -> Self {
        Self {
            armed: AtomicBool::new(armed),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Spend the fallback. Returns `true` only for the caller that spent it.
    pub fn trigger(&self) -> bool {
        self.armed.swap(false, Ordering::AcqRel)
    }
}
