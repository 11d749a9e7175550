//! Per-call proxy resolution.

use super::spec::ProxySpec;

use rand::seq::IndexedRandom;

/// Picks the proxy a request goes through.
///
/// Resolution order: a proxy pinned by the caller, then a uniformly random entry
/// of the proxy list, then the single configured proxy, then none.
///
/// ```rust
/// use pathprobe::proxy::ProxySelector;
///
/// let selector = ProxySelector::new(None, vec!["10.0.0.1:8080".into()]);
/// assert_eq!(selector.select(None).unwrap().url(), "http://10.0.0.1:8080");
/// assert_eq!(
///     selector.select(Some("socks5://10.0.0.9:1080")).unwrap().url(),
///     "socks5://10.0.0.9:1080"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxySelector {
    single: Option<String>,
    list: Vec<String>,
}

impl ProxySelector {
    pub fn new(single: Option<String>, list: Vec<String>) -> Self {
        Self {
            single: single.filter(|p| !p.trim().is_empty()),
            list: list.into_iter().filter(|p| !p.trim().is_empty()).collect(),
        }
    }

    /// Whether any proxy is configured on the instance.
    pub fn is_configured(&self) -> bool {
        self.single.is_some() || !self.list.is_empty()
    }

    pub fn single(&self) -> Option<&str> {
        self.single.as_deref()
    }

    pub fn list(&self) -> &[String] {
        &self.list
    }

    /// Resolve the proxy for one call.
    pub fn select(&self, pinned: Option<&str>) -> Option<ProxySpec> {
        let raw = match pinned.filter(|p| !p.trim().is_empty()) {
            Some(pinned) => Some(pinned),
            None => self
                .list
                .choose(&mut rand::rng())
                .map(String::as_str)
                .or(self.single.as_deref()),
        };
        raw.map(ProxySpec::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_proxy() {
        let selector = ProxySelector::default();
        assert!(!selector.is_configured());
        assert_eq!(selector.select(None), None);
    }

    #[test]
    fn test_single_proxy() {
        let selector = ProxySelector::new(Some("http://p:1".into()), vec![]);
        assert!(selector.is_configured());
        assert_eq!(selector.select(None).unwrap().url(), "http://p:1");
    }

    #[test]
    fn test_list_wins_over_single() {
        let selector = ProxySelector::new(
            Some("http://single:1".into()),
            vec!["http://a:1".into(), "http://b:1".into()],
        );
        for _ in 0..50 {
            let url = selector.select(None).unwrap().url().to_string();
            assert!(url == "http://a:1" || url == "http://b:1", "{}", url);
        }
    }

    #[test]
    fn test_pinned_bypasses_rotation() {
        let selector = ProxySelector::new(None, vec!["http://a:1".into()]);
        for _ in 0..10 {
            assert_eq!(
                selector.select(Some("socks5://pinned:9")).unwrap().url(),
                "socks5://pinned:9"
            );
        }
    }

    #[test]
    fn test_blank_entries_are_ignored() {
        let selector = ProxySelector::new(Some("  ".into()), vec!["".into()]);
        assert!(!selector.is_configured());
        assert_eq!(selector.select(Some("")), None);
    }
}
