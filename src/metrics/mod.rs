//! Process-local counters for parameter fetches and invocations.
//!
//! Counters live as long as the warm function instance and are reported in
//! the debug log after every invocation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the client, the cached parameter and the handler.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    /// Requests sent to the parameter store
    store_requests_total: Arc<AtomicU64>,

    /// Failed parameter store requests
    store_errors_total: Arc<AtomicU64>,

    /// Total duration of all store requests in milliseconds
    store_duration_total_ms: Arc<AtomicU64>,

    /// Values served from memory
    cache_hits_total: Arc<AtomicU64>,

    /// Lookups that had to go to the store
    cache_misses_total: Arc<AtomicU64>,

    /// Times the default value was rendered
    fallbacks_total: Arc<AtomicU64>,

    /// Invocations handled
    invocations_total: Arc<AtomicU64>,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a store request with duration.
    pub fn record_store_request(&self, duration: Duration) {
        self.store_requests_total.fetch_add(1, Ordering::Relaxed);
        self.store_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a store error.
    pub fn record_store_error(&self) {
        self.store_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache lookup.
    pub fn record_cache_access(&self, hit: bool) {
        if hit {
            self.cache_hits_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cache_misses_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_fallback(&self) {
        self.fallbacks_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invocation(&self) {
        self.invocations_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn store_requests_total(&self) -> u64 {
        self.store_requests_total.load(Ordering::Relaxed)
    }

    pub fn store_errors_total(&self) -> u64 {
        self.store_errors_total.load(Ordering::Relaxed)
    }

    pub fn cache_hits_total(&self) -> u64 {
        self.cache_hits_total.load(Ordering::Relaxed)
    }

    pub fn cache_misses_total(&self) -> u64 {
        self.cache_misses_total.load(Ordering::Relaxed)
    }

    pub fn fallbacks_total(&self) -> u64 {
        self.fallbacks_total.load(Ordering::Relaxed)
    }

    pub fn invocations_total(&self) -> u64 {
        self.invocations_total.load(Ordering::Relaxed)
    }

    /// Get average store request duration in milliseconds.
    pub fn store_duration_avg_ms(&self) -> f64 {
        let total = self.store_duration_total_ms.load(Ordering::Relaxed);
        let count = self.store_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            store_requests_total: self.store_requests_total(),
            store_errors_total: self.store_errors_total(),
            store_duration_avg_ms: self.store_duration_avg_ms(),
            cache_hits_total: self.cache_hits_total(),
            cache_misses_total: self.cache_misses_total(),
            fallbacks_total: self.fallbacks_total(),
            invocations_total: self.invocations_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub store_requests_total: u64,
    pub store_errors_total: u64,
    pub store_duration_avg_ms: f64,
    pub cache_hits_total: u64,
    pub cache_misses_total: u64,
    pub fallbacks_total: u64,
    pub invocations_total: u64,
}

/// Helper for timing store requests.
pub struct StoreTimer {
    start: Instant,
    metrics: Metrics,
}

impl StoreTimer {
    /// Start timing a store request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_store_request(self.start.elapsed());
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        self.metrics.record_store_request(self.start.elapsed());
        self.metrics.record_store_error();
    }
}
