//! Translation metrics and observability.
//!
//! Counters for cache behavior, provider calls and the diagnostics the
//! resolver absorbs instead of surfacing (conflicts, stale discards).

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Translation counters for one runtime.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Lookups answered from the cache
    cache_hits: AtomicUsize,

    /// Lookups that found nothing in the cache
    cache_misses: AtomicUsize,

    /// Calls issued to the translation provider
    provider_calls: AtomicUsize,

    /// Provider calls that failed
    provider_failures: AtomicUsize,

    /// Requests that joined an in-flight provider call instead of issuing one
    deduplicated: AtomicUsize,

    /// Completed requests dropped because the locale changed meanwhile
    stale_discards: AtomicUsize,

    /// Provider results rejected because a different value was already cached
    cache_conflicts: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_provider_call(&self) {
        self.provider_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_provider_failure(&self) {
        self.provider_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_deduplicated(&self) {
        self.deduplicated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_discard(&self) {
        self.stale_discards.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_conflict(&self) {
        self.cache_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn provider_calls(&self) -> usize {
        self.provider_calls.load(Ordering::Relaxed)
    }

    pub fn provider_failures(&self) -> usize {
        self.provider_failures.load(Ordering::Relaxed)
    }

    pub fn deduplicated(&self) -> usize {
        self.deduplicated.load(Ordering::Relaxed)
    }

    pub fn stale_discards(&self) -> usize {
        self.stale_discards.load(Ordering::Relaxed)
    }

    pub fn cache_conflicts(&self) -> usize {
        self.cache_conflicts.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        let calls = self.provider_calls();
        let failures = self.provider_failures();
        let provider_success_rate = if calls > 0 {
            (calls.saturating_sub(failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            provider_calls: calls,
            provider_failures: failures,
            provider_success_rate,
            deduplicated: self.deduplicated(),
            stale_discards: self.stale_discards(),
            cache_conflicts: self.cache_conflicts(),
        }
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub provider_calls: usize,
    pub provider_failures: usize,

    /// Provider success rate as a percentage (0-100)
    pub provider_success_rate: f64,

    pub deduplicated: usize,
    pub stale_discards: usize,
    pub cache_conflicts: usize,
}
