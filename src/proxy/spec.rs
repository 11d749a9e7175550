//! Normalized proxy endpoints and their mapping onto reqwest proxies.

use crate::target::Scheme;

use reqwest::Proxy;
use std::fmt;

/// Proxy protocols understood by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyScheme {
    Http,
    Https,
    Socks5,
    Socks5h,
    Socks4,
    Socks4a,
}

impl ProxyScheme {
    const ALL: [ProxyScheme; 6] = [
        ProxyScheme::Http,
        ProxyScheme::Https,
        ProxyScheme::Socks5,
        ProxyScheme::Socks5h,
        ProxyScheme::Socks4,
        ProxyScheme::Socks4a,
    ];

    /// URL prefix identifying the protocol.
    pub fn prefix(&self) -> &'static str {
        match self {
            ProxyScheme::Http => "http://",
            ProxyScheme::Https => "https://",
            ProxyScheme::Socks5 => "socks5://",
            ProxyScheme::Socks5h => "socks5h://",
            ProxyScheme::Socks4 => "socks4://",
            ProxyScheme::Socks4a => "socks4a://",
        }
    }

    pub fn is_socks(&self) -> bool {
        !matches!(self, ProxyScheme::Http | ProxyScheme::Https)
    }
}

/// A proxy URL with an explicit, recognized scheme.
///
/// ```rust
/// use pathprobe::proxy::{ProxyScheme, ProxySpec};
///
/// let proxy = ProxySpec::parse("127.0.0.1:8080");
/// assert_eq!(proxy.url(), "http://127.0.0.1:8080");
/// assert_eq!(proxy.scheme(), ProxyScheme::Http);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxySpec {
    url: String,
    scheme: ProxyScheme,
}

impl ProxySpec {
    /// Normalize a user-supplied proxy, defaulting to `http://` when the string
    /// carries no recognized scheme prefix.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let known = ProxyScheme::ALL
            .into_iter()
            .find(|scheme| raw.starts_with(scheme.prefix()));

        match known {
            Some(scheme) => Self {
                url: raw.to_string(),
                scheme,
            },
            None => Self {
                url: format!("{}{}", ProxyScheme::Http.prefix(), raw),
                scheme: ProxyScheme::Http,
            },
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn scheme(&self) -> ProxyScheme {
        self.scheme
    }

    /// Whether traffic to a target using `target` goes through this proxy.
    ///
    /// An `https://` proxy only carries HTTPS targets; HTTP and SOCKS proxies carry
    /// both.
    pub fn covers(&self, target: Scheme) -> bool {
        match self.scheme {
            ProxyScheme::Https => target == Scheme::Https,
            _ => true,
        }
    }

    /// Build the reqwest proxy matching [`covers`](Self::covers).
    pub fn to_reqwest(&self) -> reqwest::Result<Proxy> {
        match self.scheme {
            ProxyScheme::Https => Proxy::https(self.url.as_str()),
            _ => Proxy::all(self.url.as_str()),
        }
    }
}

impl fmt::Display for ProxySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
