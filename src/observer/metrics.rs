//! Counters for resolver activity.

use super::{ResolverEvent, ResolverObserver};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cache and generation counters, fed by [`ResolverEvent`]s.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Lookups that found an existing entry
    cache_hits: AtomicUsize,

    /// Lookups that found nothing
    cache_misses: AtomicUsize,

    entries_created: AtomicUsize,

    /// Generation calls, successful or not
    generation_calls: AtomicUsize,

    generation_failures: AtomicUsize,

    /// Requests left out of a batch response
    dropped_requests: AtomicUsize,
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

    pub fn record_entry_created(&self) {
        self.entries_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_generation(&self, succeeded: bool) {
        self.generation_calls.fetch_add(1, Ordering::Relaxed);
        if !succeeded {
            self.generation_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_dropped_request(&self) {
        self.dropped_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn entries_created(&self) -> usize {
        self.entries_created.load(Ordering::Relaxed)
    }

    pub fn generation_calls(&self) -> usize {
        self.generation_calls.load(Ordering::Relaxed)
    }

    pub fn generation_failures(&self) -> usize {
        self.generation_failures.load(Ordering::Relaxed)
    }

    pub fn dropped_requests(&self) -> usize {
        self.dropped_requests.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_lookups = hits + misses;
        let cache_hit_rate = if total_lookups > 0 {
            (hits as f64 / total_lookups as f64) * 100.0
        } else {
            0.0
        };

        let calls = self.generation_calls();
        let failures = self.generation_failures();
        let generation_success_rate = if calls > 0 {
            ((calls - failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            entries_created: self.entries_created(),
            generation_calls: calls,
            generation_failures: failures,
            generation_success_rate,
            dropped_requests: self.dropped_requests(),
        }
    }
}

impl ResolverObserver for TranslationMetrics {
    fn on_event(&self, event: &ResolverEvent) {
        match event {
            ResolverEvent::CacheHit { .. } => self.record_cache_hit(),
            ResolverEvent::CacheMiss { .. } => self.record_cache_miss(),
            ResolverEvent::EntryCreated { .. } => self.record_entry_created(),
            ResolverEvent::Generated { .. } => self.record_generation(true),
            ResolverEvent::GenerationFailed { .. } => self.record_generation(false),
            ResolverEvent::RequestDropped { .. } => self.record_dropped_request(),
            ResolverEvent::CreateFailed { .. } | ResolverEvent::BundleIncomplete { .. } => {}
        }
    }
}

/// Snapshot of [`TranslationMetrics`].
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,

    pub cache_misses: usize,

    /// Percentage (0-100)
    pub cache_hit_rate: f64,

    pub entries_created: usize,

    pub generation_calls: usize,

    pub generation_failures: usize,

    /// Percentage (0-100)
    pub generation_success_rate: f64,

    pub dropped_requests: usize,
}
