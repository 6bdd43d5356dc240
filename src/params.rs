//! Placeholder values for URL templates
//!
//! `RouteParams` carries the `:placeholder` replacements handed to
//! [`UrlManager::compile`](crate::UrlManager::compile), and the defaults a
//! template is registered with.

use std::collections::BTreeMap;

/// Named string values substituted into `:placeholder` slots
///
/// # Example
///
/// ```
/// use fragment_router::RouteParams;
///
/// let mut params = RouteParams::new();
/// params.insert("id", "123");
///
/// assert_eq!(params.get("id"), Some("123"));
/// assert_eq!(params.get_as::<i32>("id"), Some(123));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: BTreeMap<String, String>,
}

impl RouteParams {
    /// Create new empty params
    pub fn new() -> Self {
        Self::default()
    }

    /// Build params from `(name, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Self {
            params: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        }
    }

    /// Get a value as a string
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a value and parse it as a specific type
    ///
    /// Returns `None` if the value doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert a value, replacing any previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.params.insert(key.into(), value.to_string());
    }

    /// Check if a value exists
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Overlay `other` on top of `self`; values in `other` win
    pub fn merged(&self, other: &RouteParams) -> RouteParams {
        let mut params = self.params.clone();
        params.extend(other.params.iter().map(|(k, v)| (k.clone(), v.clone())));
        RouteParams { params }
    }

    /// Iterate over all values
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check if there are no values
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_basic() {
        let mut params = RouteParams::new();
        params.insert("id", 123);

        assert_eq!(params.get("id"), Some("123"));
        assert!(params.contains("id"));
        assert!(!params.contains("missing"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_params_get_as() {
        let params = RouteParams::from_pairs([("id", "123"), ("active", "true")]);

        assert_eq!(params.get_as::<u32>("id"), Some(123));
        assert_eq!(params.get_as::<bool>("active"), Some(true));
        assert_eq!(params.get_as::<i32>("active"), None);
        assert_eq!(params.get_as::<i32>("missing"), None);
    }

    #[test]
    fn test_params_merged_prefers_overlay() {
        let defaults = RouteParams::from_pairs([("category", "news"), ("id", "1")]);
        let overlay = RouteParams::from_pairs([("category", "tutorials")]);

        let merged = defaults.merged(&overlay);
        assert_eq!(merged.get("category"), Some("tutorials"));
        assert_eq!(merged.get("id"), Some("1"));
        // Source params are left untouched
        assert_eq!(defaults.get("category"), Some("news"));
    }
}
