//! Target URL normalization.
//!
//! A [`Target`] is the decomposed, validated form of the URL a requester is bound
//! to. Parsing is synchronous; resolving the IP address is a separate async step so
//! that it can be skipped when a proxy is in charge of name resolution.

use super::encode::encode_base_path;
use crate::error::{Error, Result};

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use tokio::net::lookup_host;
use tracing::debug;

/// Protocols a target can be reached over.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Plain HTTP, port 80 by default.
    #[default]
    Http,
    /// HTTP over TLS, port 443 by default.
    Https,
}

impl Scheme {
    /// Lowercase scheme name as it appears in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Port used when the URL does not carry one.
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            other => Err(Error::UnsupportedScheme(other.to_string())),
        }
    }
}

/// The endpoint a requester probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Input URL with a trailing slash and an explicit scheme.
    url: String,
    scheme: Scheme,
    /// Host as written in the URL. IPv6 literals keep their brackets.
    host: String,
    ip: Option<IpAddr>,
    port: u16,
    /// Percent-encoded path prefix, never starting with `/`.
    base_path: String,
}

impl Target {
    /// Parse and validate a target URL without resolving it.
    ///
    /// `default_scheme` is used when the URL has no `://` delimiter.
    ///
    /// ```rust
    /// use pathprobe::target::{Scheme, Target};
    ///
    /// let target = Target::parse("example.com:8080/app", Scheme::Http).unwrap();
    /// assert_eq!(target.host(), "example.com");
    /// assert_eq!(target.port(), 8080);
    /// assert_eq!(target.base_path(), "app/");
    /// ```
    pub fn parse(url: &str, default_scheme: Scheme) -> Result<Self> {
        let mut url = url.to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        if !url.contains("://") {
            url = format!("{}://{}", default_scheme, url);
        }

        let (raw_scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| Error::InvalidUrl(url.clone()))?;
        let scheme: Scheme = raw_scheme.parse()?;

        let authority_end = rest
            .find(|c| matches!(c, '/' | '?' | '#'))
            .unwrap_or(rest.len());
        let (authority, remainder) = rest.split_at(authority_end);
        let path_end = remainder
            .find(|c| matches!(c, '?' | '#'))
            .unwrap_or(remainder.len());
        let path = &remainder[..path_end];
        let base_path = encode_base_path(path.strip_prefix('/').unwrap_or(path));

        // Credentials never take part in host or port detection.
        let authority = authority
            .rsplit_once('@')
            .map_or(authority, |(_, host_port)| host_port);
        let (host, port) = split_authority(authority)?;
        if host.is_empty() {
            return Err(Error::InvalidUrl(format!("no host in {}", url)));
        }
        let port = match port {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::InvalidPort(raw.to_string()))?,
            None => scheme.default_port(),
        };

        Ok(Self {
            url: url.clone(),
            scheme,
            host,
            ip: None,
            port,
            base_path,
        })
    }

    /// Pin the IP address requests are sent to.
    ///
    /// An explicit `ip` always wins. Otherwise the host is looked up, unless a proxy
    /// is configured: the proxy may resolve the name differently, so a local failure
    /// would be meaningless.
    pub async fn resolve(mut self, ip: Option<IpAddr>, has_proxy: bool) -> Result<Self> {
        self.ip = match ip {
            Some(ip) => Some(ip),
            None if has_proxy => None,
            None => Some(lookup(self.lookup_name(), self.port).await?),
        };
        Ok(self)
    }

    /// The working URL: trailing slash added and scheme made explicit.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.ip
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Whether the port is the well-known one for the scheme.
    pub fn has_default_port(&self) -> bool {
        self.port == self.scheme.default_port()
    }

    /// Value of the `Host` header requests carry by default.
    pub fn host_header(&self) -> String {
        if self.has_default_port() {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Build the base request URL, `scheme://endpoint:port/`.
    ///
    /// The endpoint is the resolved IP unless `by_hostname` is set or no IP was
    /// resolved.
    pub fn base_url(&self, by_hostname: bool) -> String {
        let endpoint = match (by_hostname, self.ip) {
            (false, Some(IpAddr::V4(ip))) => ip.to_string(),
            (false, Some(IpAddr::V6(ip))) => format!("[{}]", ip),
            _ => self.host.clone(),
        };
        format!("{}://{}:{}/", self.scheme, endpoint, self.port)
    }

    fn lookup_name(&self) -> &str {
        self.host.trim_start_matches('[').trim_end_matches(']')
    }
}

/// Parse, validate and resolve a target URL in one go.
pub async fn normalize(
    url: &str,
    default_scheme: Scheme,
    ip: Option<IpAddr>,
    has_proxy: bool,
) -> Result<Target> {
    Target::parse(url, default_scheme)?
        .resolve(ip, has_proxy)
        .await
}

/// Split `host[:port]`, keeping bracketed IPv6 literals whole.
fn split_authority(authority: &str) -> Result<(String, Option<&str>)> {
    if let Some(inner) = authority.strip_prefix('[') {
        let (literal, after) = inner
            .split_once(']')
            .ok_or_else(|| Error::InvalidUrl(format!("unterminated IPv6 literal: {}", authority)))?;
        let host = format!("[{}]", literal);
        return match after.strip_prefix(':') {
            Some(port) => Ok((host, Some(port))),
            None if after.is_empty() => Ok((host, None)),
            None => Err(Error::InvalidPort(after.to_string())),
        };
    }

    Ok(match authority.split_once(':') {
        Some((host, port)) => (host.to_string(), Some(port)),
        None => (authority.to_string(), None),
    })
}

/// Resolve a host name, preferring IPv4 addresses.
async fn lookup(host: &str, port: u16) -> Result<IpAddr> {
    let addrs: Vec<IpAddr> = lookup_host((host, port))
        .await
        .map_err(|e| {
            debug!("DNS lookup for {} failed: {}", host, e);
            Error::Dns(host.to_string())
        })?
        .map(|addr| addr.ip())
        .collect();

    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| Error::Dns(host.to_string()))
}
