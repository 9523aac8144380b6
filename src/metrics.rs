use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Proxy counters for `/metrics`
#[derive(Clone)]
pub struct Metrics {
    pub requests_proxied: Arc<AtomicU64>,
    pub upstream_failures: Arc<AtomicU64>,
    pub upstream_error_responses: Arc<AtomicU64>,
    pub bytes_forwarded: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            requests_proxied: Arc::new(AtomicU64::new(0)),
            upstream_failures: Arc::new(AtomicU64::new(0)),
            upstream_error_responses: Arc::new(AtomicU64::new(0)),
            bytes_forwarded: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_requests_proxied(&self) {
        self.requests_proxied.fetch_add(1, Ordering::Relaxed);
    }

    /// Backend unreachable or timed out.
    pub fn inc_upstream_failures(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Backend answered with a 5xx status.
    pub fn inc_upstream_error_responses(&self) {
        self.upstream_error_responses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_bytes_forwarded(&self, bytes: u64) {
        self.bytes_forwarded.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_proxied: self.requests_proxied.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
            upstream_error_responses: self.upstream_error_responses.load(Ordering::Relaxed),
            bytes_forwarded: self.bytes_forwarded.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub requests_proxied: u64,
    pub upstream_failures: u64,
    pub upstream_error_responses: u64,
    pub bytes_forwarded: u64,
    pub uptime_seconds: u64,
}
