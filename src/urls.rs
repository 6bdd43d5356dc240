//! Named URL templates with `:placeholder` substitution
//!
//! Keeps the JSON/XHR endpoints of an application in one place and compiles
//! them on demand:
//!
//! ```
//! use fragment_router::{RouteParams, UrlManager};
//!
//! let mut urls = UrlManager::new();
//! urls.add(
//!     "post",
//!     "/posts/:category/:id.json",
//!     RouteParams::from_pairs([("category", "news"), ("id", "1")]),
//! );
//!
//! let url = urls
//!     .compile("post", &RouteParams::from_pairs([("category", "tutorials"), ("id", "123")]))
//!     .unwrap();
//! assert_eq!(url, "/posts/tutorials/123.json");
//! ```

use crate::error::RouterError;
use crate::params::RouteParams;
use crate::trace_log;
use std::collections::HashMap;

/// A registered template and its default placeholder values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    /// Path with `:placeholder` slots
    pub path: String,
    /// Values used when `compile` doesn't supply one
    pub defaults: RouteParams,
}

/// Registry of URL templates by reference name
#[derive(Debug, Clone, Default)]
pub struct UrlManager {
    urls: HashMap<String, UrlTemplate>,
}

impl UrlManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under `name`, replacing any previous one
    pub fn add(&mut self, name: impl Into<String>, path: impl Into<String>, defaults: RouteParams) {
        let name = name.into();
        let path = path.into();
        trace_log!("Registering url '{}' -> '{}'", name, path);
        self.urls.insert(name, UrlTemplate { path, defaults });
    }

    /// Get the template registered under `name`
    pub fn get(&self, name: &str) -> Option<&UrlTemplate> {
        self.urls.get(name)
    }

    /// Compile the template `name`, filling placeholders from `replacements`
    /// and falling back to the template's defaults.
    ///
    /// Placeholders without a value are left in place.
    pub fn compile(&self, name: &str, replacements: &RouteParams) -> Result<String, RouterError> {
        let template = self.urls.get(name).ok_or_else(|| RouterError::UrlNotFound {
            name: name.to_string(),
        })?;
        let values = template.defaults.merged(replacements);
        Ok(substitute_placeholders(&template.path, &values))
    }

    /// Check if a template is registered
    pub fn contains(&self, name: &str) -> bool {
        self.urls.contains_key(name)
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Check if no templates are registered
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Replace every `:key` in `path` with its value.
///
/// Longer keys go first so `:id` never eats the front of `:identifier`.
fn substitute_placeholders(path: &str, values: &RouteParams) -> String {
    let mut keys: Vec<(&str, &str)> = values.iter().collect();
    keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut result = path.to_string();
    for (key, value) in keys {
        let placeholder = format!(":{}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_with_defaults() {
        let mut urls = UrlManager::new();
        urls.add(
            "post",
            "/posts/:category/:id.json",
            RouteParams::from_pairs([("category", "news"), ("id", "1")]),
        );

        let url = urls.compile("post", &RouteParams::new()).unwrap();
        assert_eq!(url, "/posts/news/1.json");
    }

    #[test]
    fn test_compile_replacements_override_defaults() {
        let mut urls = UrlManager::new();
        urls.add(
            "post",
            "/posts/:category/:id.json",
            RouteParams::from_pairs([("category", "news"), ("id", "1")]),
        );

        let url = urls
            .compile("post", &RouteParams::from_pairs([("id", 123)]))
            .unwrap();
        assert_eq!(url, "/posts/news/123.json");
    }

    #[test]
    fn test_compile_replaces_every_occurrence() {
        let mut urls = UrlManager::new();
        urls.add("mirror", "/:a/:a", RouteParams::new());

        let url = urls
            .compile("mirror", &RouteParams::from_pairs([("a", "x")]))
            .unwrap();
        assert_eq!(url, "/x/x");
    }

    #[test]
    fn test_compile_prefix_keys() {
        let mut urls = UrlManager::new();
        urls.add("user", "/users/:id/:identifier", RouteParams::new());

        let url = urls
            .compile(
                "user",
                &RouteParams::from_pairs([("id", "7"), ("identifier", "abc")]),
            )
            .unwrap();
        assert_eq!(url, "/users/7/abc");
    }

    #[test]
    fn test_compile_without_value_keeps_placeholder() {
        let mut urls = UrlManager::new();
        urls.add("user", "/users/:id", RouteParams::new());

        assert_eq!(urls.compile("user", &RouteParams::new()).unwrap(), "/users/:id");
    }

    #[test]
    fn test_compile_unknown_name() {
        let urls = UrlManager::new();
        let err = urls.compile("missing", &RouteParams::new()).unwrap_err();
        assert_eq!(
            err,
            RouterError::UrlNotFound {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_add_replaces() {
        let mut urls = UrlManager::new();
        urls.add("home", "/old", RouteParams::new());
        urls.add("home", "/new", RouteParams::new());

        assert_eq!(urls.len(), 1);
        assert_eq!(urls.get("home").map(|t| t.path.as_str()), Some("/new"));
    }
}
