//! Request header store.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Ordered, case-insensitive set of request headers.
///
/// Setting a header that already exists replaces its value in place; names are
/// compared ignoring ASCII case, as HTTP does.
///
/// ```rust
/// use pathprobe::http::HeaderStore;
///
/// let mut headers = HeaderStore::new();
/// headers.set(" Accept ", " */* ");
/// headers.set("accept", "text/html");
/// assert_eq!(headers.get("ACCEPT"), Some("text/html"));
/// assert_eq!(headers.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderStore {
    entries: Vec<(String, String)>,
}

impl HeaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, trimming both name and value.
    pub fn set(&mut self, key: &str, value: &str) {
        let key = key.trim();
        let value = value.trim();
        match self
            .entries
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
        {
            Some(entry) => *entry = (key.to_string(), value.to_string()),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    /// Remove a header, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let key = key.trim();
        let index = self
            .entries
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(key))?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.trim();
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert into a `HeaderMap`, rejecting names or values HTTP cannot carry.
    pub fn to_header_map(&self) -> Result<HeaderMap, String> {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| format!("invalid header name {:?}: {}", name, e))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| format!("invalid value for header {:?}: {}", name, e))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}
