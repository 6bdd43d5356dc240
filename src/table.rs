//! Insertion-ordered route table
//!
//! Routes are keyed by their literal pattern string but tested in the order
//! they were first registered. The first structural match wins, even if a
//! later route would match the same fragment more specifically.

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, CachedResolution, RouteCache};
use crate::route::{Action, Route};
use crate::{debug_log, trace_log};

/// A resolved fragment: which route matched and what it captured
#[derive(Clone)]
pub struct RouteMatch {
    /// Pattern of the matching route
    pub pattern: String,
    /// Captured groups, left to right
    pub captures: Vec<String>,
    /// Action to invoke
    pub action: Action,
}

impl RouteMatch {
    /// Invoke the matched action with the captured groups
    pub fn invoke(&self) {
        (self.action)(&self.captures);
    }
}

impl std::fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteMatch")
            .field("pattern", &self.pattern)
            .field("captures", &self.captures)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of routes
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    #[cfg(feature = "cache")]
    cache: RouteCache,
}

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, or replace the action of the route with the same
    /// pattern string. A replaced route keeps its original position.
    pub fn insert(&mut self, route: Route) {
        if let Some(existing) = self
            .routes
            .iter_mut()
            .find(|existing| existing.pattern() == route.pattern())
        {
            debug_log!("Replacing route '{}'", route.pattern());
            *existing = route;
        } else {
            debug_log!("Adding route '{}'", route.pattern());
            self.routes.push(route);
        }

        // Routes have changed, so any cached resolutions may now be stale.
        #[cfg(feature = "cache")]
        self.cache.clear();
    }

    /// Find the first route matching `fragment`
    #[cfg(feature = "cache")]
    pub fn resolve(&mut self, fragment: &str) -> Option<RouteMatch> {
        if let Some(cached) = self.cache.get(fragment) {
            return cached.and_then(|hit| self.to_match(hit.index, hit.captures));
        }

        let found = self.scan(fragment);
        self.cache.insert(
            fragment.to_string(),
            found
                .clone()
                .map(|(index, captures)| CachedResolution { index, captures }),
        );
        found.and_then(|(index, captures)| self.to_match(index, captures))
    }

    /// Find the first route matching `fragment`
    #[cfg(not(feature = "cache"))]
    pub fn resolve(&mut self, fragment: &str) -> Option<RouteMatch> {
        self.scan(fragment)
            .and_then(|(index, captures)| self.to_match(index, captures))
    }

    /// Patterns in match order
    pub fn patterns(&self) -> Vec<String> {
        self.routes.iter().map(|r| r.pattern().to_string()).collect()
    }

    /// Number of routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if no routes are registered
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolution cache statistics
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    fn scan(&self, fragment: &str) -> Option<(usize, Vec<String>)> {
        self.routes.iter().enumerate().find_map(|(index, route)| {
            let captures = route.captures(fragment)?;
            trace_log!("Fragment '{}' matched route '{}'", fragment, route.pattern());
            Some((index, captures))
        })
    }

    fn to_match(&self, index: usize, captures: Vec<String>) -> Option<RouteMatch> {
        let route = self.routes.get(index)?;
        Some(RouteMatch {
            pattern: route.pattern().to_string(),
            captures,
            action: route.action().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> Action {
        let log = log.clone();
        let tag = tag.to_string();
        Arc::new(move |captures: &[String]| {
            log.lock().unwrap().push(format!("{}:{}", tag, captures.join(",")));
        })
    }

    #[test]
    fn test_insertion_order_first_wins() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut table = RouteTable::new();
        table.insert(Route::with_action("(\\w+)", recording(&log, "any")).unwrap());
        table.insert(Route::with_action("fixed", recording(&log, "fixed")).unwrap());

        let hit = table.resolve("fixed").unwrap();
        assert_eq!(hit.pattern, "(\\w+)");
        assert_eq!(hit.captures, vec!["fixed".to_string()]);
        hit.invoke();
        assert_eq!(*log.lock().unwrap(), vec!["any:fixed".to_string()]);
    }

    #[test]
    fn test_literal_and_group_routes() {
        let mut table = RouteTable::new();
        table.insert(Route::noop("a").unwrap());
        table.insert(Route::noop("a/(\\d+)").unwrap());

        let hit = table.resolve("a").unwrap();
        assert_eq!(hit.pattern, "a");
        assert!(hit.captures.is_empty());

        let hit = table.resolve("a/123").unwrap();
        assert_eq!(hit.pattern, "a/(\\d+)");
        assert_eq!(hit.captures, vec!["123".to_string()]);
    }

    #[test]
    fn test_unmatched_is_none() {
        let mut table = RouteTable::new();
        table.insert(Route::noop("a").unwrap());
        assert!(table.resolve("").is_none());
        assert!(table.resolve("b").is_none());
    }

    #[test]
    fn test_replace_keeps_position() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut table = RouteTable::new();
        table.insert(Route::with_action("x", recording(&log, "first")).unwrap());
        table.insert(Route::noop("(x)").unwrap());
        table.insert(Route::with_action("x", recording(&log, "second")).unwrap());

        assert_eq!(table.len(), 2);
        assert_eq!(table.patterns(), vec!["x".to_string(), "(x)".to_string()]);

        table.resolve("x").unwrap().invoke();
        assert_eq!(*log.lock().unwrap(), vec!["second:".to_string()]);
    }

    #[test]
    fn test_insert_after_resolve_sees_new_route() {
        let mut table = RouteTable::new();
        assert!(table.resolve("late").is_none());

        table.insert(Route::noop("late").unwrap());
        assert_eq!(table.resolve("late").unwrap().pattern, "late");
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_repeated_resolve_hits_cache() {
        let mut table = RouteTable::new();
        table.insert(Route::noop("posts/(\\d+)").unwrap());

        table.resolve("posts/1");
        table.resolve("posts/1");
        assert_eq!(table.cache_stats().hits, 1);
        assert_eq!(table.cache_stats().misses, 1);
    }
}
