//! Fragment resolution caching
//!
//! Memoises which route (if any) a fragment resolves to, with LRU eviction.
//! Negative results are cached too, since unmatched fragments are common.

use crate::trace_log;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Cached outcome of resolving one fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResolution {
    /// Index of the matching route in the table
    pub index: usize,
    /// Captured groups
    pub captures: Vec<String>,
}

/// Cache performance statistics
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub invalidations: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Fragment resolution cache with LRU eviction
///
/// Default capacity: 256 fragments.
#[derive(Debug)]
pub struct RouteCache {
    entries: LruCache<String, Option<CachedResolution>>,
    stats: CacheStats,
}

impl RouteCache {
    const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(NonZeroUsize::new(Self::DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    pub fn clear(&mut self) {
        trace_log!("Clearing fragment cache");
        self.entries.clear();
        self.stats.invalidations += 1;
    }

    /// Look up a fragment.
    ///
    /// The outer `Option` is the cache hit; the inner one is the cached
    /// resolution, `None` meaning "known not to match".
    pub fn get(&mut self, fragment: &str) -> Option<Option<CachedResolution>> {
        if let Some(entry) = self.entries.get(fragment) {
            self.stats.hits += 1;
            trace_log!("Fragment cache hit for '{}'", fragment);
            Some(entry.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("Fragment cache miss for '{}'", fragment);
            None
        }
    }

    pub fn insert(&mut self, fragment: String, resolution: Option<CachedResolution>) {
        self.entries.push(fragment, resolution);
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_miss_then_hit() {
        let mut cache = RouteCache::new();
        assert!(cache.get("posts/1").is_none());
        assert_eq!(cache.stats().misses, 1);

        let resolution = CachedResolution {
            index: 1,
            captures: vec!["1".to_string()],
        };
        cache.insert("posts/1".to_string(), Some(resolution.clone()));

        assert_eq!(cache.get("posts/1"), Some(Some(resolution)));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_negative_entries() {
        let mut cache = RouteCache::new();
        cache.insert(String::new(), None);
        assert_eq!(cache.get(""), Some(None));
    }

    #[test]
    fn test_clear_counts_invalidations() {
        let mut cache = RouteCache::new();
        cache.insert("a".to_string(), None);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = RouteCache::with_capacity(NonZeroUsize::new(2).unwrap());
        cache.insert("a".to_string(), None);
        cache.insert("b".to_string(), None);
        cache.insert("c".to_string(), None);

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_hit_rate() {
        let mut cache = RouteCache::new();
        cache.get("a");
        cache.insert("a".to_string(), None);
        cache.get("a");
        assert!((cache.stats().hit_rate() - 0.5).abs() < 0.001);
    }
}
