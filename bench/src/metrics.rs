//! Operation counters shared by the worker threads

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct Metrics {
    ops: AtomicU64,
    errors: AtomicU64,
    latency_ns_sum: AtomicU64,
    latency_ns_max: AtomicU64,
}

/// Totals read once the run has stopped
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub ops: u64,
    pub errors: u64,
    pub ops_per_sec: f64,
    pub avg_latency_us: f64,
    pub max_latency_us: f64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_op(&self, latency: Duration) {
        let latency_ns = u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX);
        self.ops.fetch_add(1, Ordering::Relaxed);
        self.latency_ns_sum.fetch_add(latency_ns, Ordering::Relaxed);
        self.latency_ns_max.fetch_max(latency_ns, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, elapsed: Duration) -> Snapshot {
        let ops = self.ops.load(Ordering::Relaxed);
        let latency_ns_sum = self.latency_ns_sum.load(Ordering::Relaxed);
        let avg_latency_us = if ops == 0 {
            0.0
        } else {
            latency_ns_sum as f64 / ops as f64 / 1000.0
        };

        Snapshot {
            ops,
            errors: self.errors.load(Ordering::Relaxed),
            ops_per_sec: ops as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
            avg_latency_us,
            max_latency_us: self.latency_ns_max.load(Ordering::Relaxed) as f64 / 1000.0,
        }
    }
}
