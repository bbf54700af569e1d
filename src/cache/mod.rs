//! Caches used by the solver
//!
//! [`KernelCache`] is an LRU cache over kernel matrix entries; the matrix is
//! symmetric, so only K(i, j) with i <= j is stored. [`ErrorCache`] keeps the
//! per-example difference between the current decision function and the
//! label, updated incrementally after each accepted optimization step.

use lru::LruCache;
use std::num::NonZeroUsize;

/// Cache key for kernel values, normalized so that i <= j
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    i: usize,
    j: usize,
}

impl CacheKey {
    fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { i, j }
        } else {
            Self { i: j, j: i }
        }
    }
}

/// LRU cache for kernel matrix values
pub struct KernelCache {
    cache: LruCache<CacheKey, f64>,
    hits: u64,
    misses: u64,
}

impl KernelCache {
    /// Create a kernel cache holding up to `capacity` entries
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Create a kernel cache sized from a memory limit in bytes
    ///
    /// Assumes 16 bytes per entry (key + value + overhead).
    pub fn with_memory_limit(memory_bytes: usize) -> Self {
        Self::new((memory_bytes / 16).max(1))
    }

    /// Get a kernel value from the cache
    pub fn get(&mut self, i: usize, j: usize) -> Option<f64> {
        if let Some(&value) = self.cache.get(&CacheKey::new(i, j)) {
            self.hits += 1;
            Some(value)
        } else {
            self.misses += 1;
            None
        }
    }

    /// Put a kernel value into the cache
    pub fn put(&mut self, i: usize, j: usize, value: f64) {
        self.cache.put(CacheKey::new(i, j), value);
    }

    /// Fraction of lookups served from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            capacity: self.cache.cap().get(),
            size: self.cache.len(),
        }
    }

    /// Drop all entries and reset the counters
    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub capacity: usize,
    pub size: usize,
}

/// Per-example cached value of (decision_function(i) - label(i))
///
/// Invariant: after every committed step, `get(i)` equals the decision
/// function at example i minus its label, under the current alphas and
/// threshold. The incremental [`update`](ErrorCache::update) keeps the
/// invariant in O(N) per step instead of an O(N²) recomputation.
pub struct ErrorCache {
    values: Vec<f64>,
}

impl ErrorCache {
    /// Create a cache for `size` examples, all entries zero
    pub fn new(size: usize) -> Self {
        Self {
            values: vec![0.0; size],
        }
    }

    /// Cached error of example `i`
    pub fn get(&self, i: usize) -> f64 {
        self.values[i]
    }

    /// Overwrite the cached error of example `i`
    pub fn set(&mut self, i: usize, value: f64) {
        self.values[i] = value;
    }

    /// Number of tracked examples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the cache tracks no examples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Apply a committed two-variable step to every cached error
    ///
    /// `d_alpha0` and `d_alpha1` are the label-scaled coefficient changes
    /// (labelᵢ · Δalphaᵢ); `d_threshold` is the change of the threshold term
    /// as seen by the decision function. `kernel(i, j)` must evaluate the
    /// training-set kernel matrix.
    pub fn update<F>(
        &mut self,
        i0: usize,
        d_alpha0: f64,
        i1: usize,
        d_alpha1: f64,
        d_threshold: f64,
        mut kernel: F,
    ) where
        F: FnMut(usize, usize) -> f64,
    {
        for i in 0..self.values.len() {
            self.values[i] += d_threshold + d_alpha0 * kernel(i, i0) + d_alpha1 * kernel(i, i1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cache_key_normalization() {
        let key1 = CacheKey::new(1, 5);
        let key2 = CacheKey::new(5, 1);
        assert_eq!(key1, key2);
        assert_eq!(key1.i, 1);
        assert_eq!(key1.j, 5);
    }

    #[test]
    fn test_kernel_cache_basic() {
        let mut cache = KernelCache::new(3);

        assert_eq!(cache.get(0, 1), None);
        assert_eq!(cache.stats().misses, 1);

        cache.put(0, 1, 5.0);
        assert_eq!(cache.get(0, 1), Some(5.0));
        assert_eq!(cache.stats().hits, 1);

        // Symmetric access
        assert_eq!(cache.get(1, 0), Some(5.0));
        assert_eq!(cache.stats().hits, 2);
    }

    #[test]
    fn test_kernel_cache_lru_eviction() {
        let mut cache = KernelCache::new(2);

        cache.put(0, 1, 1.0);
        cache.put(1, 2, 2.0);
        cache.put(2, 3, 3.0); // evicts (0,1)

        assert_eq!(cache.get(0, 1), None);
        assert_eq!(cache.get(1, 2), Some(2.0));
        assert_eq!(cache.get(2, 3), Some(3.0));
    }

    #[test]
    fn test_hit_rate() {
        let mut cache = KernelCache::new(10);
        assert_eq!(cache.hit_rate(), 0.0);

        cache.get(0, 1);
        cache.put(0, 1, 1.0);
        cache.get(0, 1);
        assert_eq!(cache.hit_rate(), 0.5);
    }

    #[test]
    fn test_kernel_cache_clear() {
        let mut cache = KernelCache::new(10);
        cache.put(0, 1, 1.0);
        cache.get(0, 1);

        cache.clear();

        assert_eq!(cache.get(0, 1), None);
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_error_cache_set_get() {
        let mut errors = ErrorCache::new(3);
        assert_eq!(errors.len(), 3);

        errors.set(0, -1.0);
        errors.set(2, 0.5);
        assert_eq!(errors.get(0), -1.0);
        assert_eq!(errors.get(1), 0.0);
        assert_eq!(errors.get(2), 0.5);
    }

    #[test]
    fn test_error_cache_update() {
        let mut errors = ErrorCache::new(3);
        for i in 0..3 {
            errors.set(i, i as f64);
        }

        // Kernel matrix K(i, j) = 1 for every pair: each entry moves by
        // d_threshold + d_alpha0 + d_alpha1.
        errors.update(0, 0.5, 1, -0.25, 0.1, |_, _| 1.0);

        assert_relative_eq!(errors.get(0), 0.35);
        assert_relative_eq!(errors.get(1), 1.35);
        assert_relative_eq!(errors.get(2), 2.35);
    }

    #[test]
    fn test_error_cache_update_uses_kernel_columns() {
        let mut errors = ErrorCache::new(2);

        // K(i, j) = (i + 1) * (j + 1)
        errors.update(0, 1.0, 1, 1.0, 0.0, |i, j| ((i + 1) * (j + 1)) as f64);

        // entry 0: 1*K(0,0) + 1*K(0,1) = 1 + 2 = 3
        // entry 1: 1*K(1,0) + 1*K(1,1) = 2 + 4 = 6
        assert_relative_eq!(errors.get(0), 3.0);
        assert_relative_eq!(errors.get(1), 6.0);
    }
}
