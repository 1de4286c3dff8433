//! Basic metrics instrumentation.
//!
//! Provides counters for geolocation lookups and channel launches. Handles
//! are cheap to clone and share one set of counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector for acquisition and dispatch activity.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// IP-geolocation requests issued
    geo_requests_total: Arc<AtomicU64>,

    /// IP-geolocation requests that failed
    geo_errors_total: Arc<AtomicU64>,

    /// Channel launches attempted
    channel_attempts_total: Arc<AtomicU64>,

    /// Channel launches that failed
    channel_failures_total: Arc<AtomicU64>,

    /// Dispatch runs started
    dispatch_runs_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            geo_requests_total: Arc::new(AtomicU64::new(0)),
            geo_errors_total: Arc::new(AtomicU64::new(0)),
            channel_attempts_total: Arc::new(AtomicU64::new(0)),
            channel_failures_total: Arc::new(AtomicU64::new(0)),
            dispatch_runs_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an IP-geolocation request.
    pub fn record_geo_request(&self) {
        self.geo_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an IP-geolocation failure.
    pub fn record_geo_error(&self) {
        self.geo_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one channel launch attempt.
    pub fn record_channel_attempt(&self) {
        self.channel_attempts_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one failed channel launch.
    pub fn record_channel_failure(&self) {
        self.channel_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the start of a dispatch run.
    pub fn record_dispatch_run(&self) {
        self.dispatch_runs_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total geolocation requests.
    pub fn geo_requests_total(&self) -> u64 {
        self.geo_requests_total.load(Ordering::Relaxed)
    }

    /// Get total geolocation failures.
    pub fn geo_errors_total(&self) -> u64 {
        self.geo_errors_total.load(Ordering::Relaxed)
    }

    /// Get total channel attempts.
    pub fn channel_attempts_total(&self) -> u64 {
        self.channel_attempts_total.load(Ordering::Relaxed)
    }

    /// Get total channel failures.
    pub fn channel_failures_total(&self) -> u64 {
        self.channel_failures_total.load(Ordering::Relaxed)
    }

    /// Get total dispatch runs.
    pub fn dispatch_runs_total(&self) -> u64 {
        self.dispatch_runs_total.load(Ordering::Relaxed)
    }
}
