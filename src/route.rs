//! Route definition: an anchored pattern and the action it triggers

use crate::error::RouterError;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Callback invoked with the captured groups of a matched fragment
pub type Action = Arc<dyn Fn(&[String]) + Send + Sync>;

/// A `(pattern, action)` pair.
///
/// The pattern is a regular expression matched against the whole fragment;
/// it is wrapped as `^(?:pattern)$` when the route is built, so group
/// numbering is unaffected and alternations stay anchored on both ends.
///
/// # Example
///
/// ```
/// use fragment_router::Route;
///
/// let route = Route::new("posts/(\\d+)", |captures: &[String]| {
///     println!("post {}", captures[0]);
/// })
/// .unwrap();
///
/// assert_eq!(route.captures("posts/12"), Some(vec!["12".to_string()]));
/// assert_eq!(route.captures("posts/12/edit"), None);
/// ```
#[derive(Clone)]
pub struct Route {
    pattern: String,
    regex: Regex,
    action: Action,
}

impl Route {
    /// Compile `pattern` and pair it with `action`
    pub fn new<F>(pattern: impl Into<String>, action: F) -> Result<Self, RouterError>
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        Self::with_action(pattern, Arc::new(action))
    }

    /// Route whose action does nothing
    pub fn noop(pattern: impl Into<String>) -> Result<Self, RouterError> {
        Self::with_action(pattern, Arc::new(|_: &[String]| {}))
    }

    /// Compile `pattern` with an already shared action
    pub fn with_action(pattern: impl Into<String>, action: Action) -> Result<Self, RouterError> {
        let pattern = pattern.into();
        let regex = compile_anchored(&pattern)?;
        Ok(Self {
            pattern,
            regex,
            action,
        })
    }

    /// The literal pattern string this route is keyed by
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Shared handle to the action
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Match `fragment` and return its capture groups in left-to-right order.
    ///
    /// Groups that did not take part in the match come back as empty strings.
    pub fn captures(&self, fragment: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(fragment)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
        )
    }

    /// Invoke the action with `captures`
    pub fn invoke(&self, captures: &[String]) {
        (self.action)(captures);
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

fn compile_anchored(pattern: &str) -> Result<Regex, RouterError> {
    Regex::new(&format!("^(?:{})$", pattern))
        .map_err(|err| RouterError::invalid_pattern(pattern, &err))
}
