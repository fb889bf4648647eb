//! Worker metrics
//!
//! Atomic counters for the pipeline worker. All operations use relaxed
//! ordering; the values are eventually consistent, not real-time.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a pipeline worker
///
/// Safe to read from any thread while workers are running.
#[derive(Debug, Default)]
pub struct WorkerMetrics {
    /// Messages received from consumers
    messages_received: AtomicU64,

    /// Messages kept by the chain and forwarded to the producer
    messages_forwarded: AtomicU64,

    /// Messages dropped by the chain
    messages_dropped: AtomicU64,

    /// Messages kept by the chain but lost because the producer went away
    forward_failures: AtomicU64,

    /// Payload bytes received
    bytes_received: AtomicU64,

    /// Payload bytes forwarded (after hooks rewrote them)
    bytes_forwarded: AtomicU64,
}

impl WorkerMetrics {
    /// Create new metrics with all counters at zero
    pub const fn new() -> Self {
        Self {
            messages_received: AtomicU64::new(0),
            messages_forwarded: AtomicU64::new(0),
            messages_dropped: AtomicU64::new(0),
            forward_failures: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            bytes_forwarded: AtomicU64::new(0),
        }
    }

    /// Record a message received from a consumer
    #[inline]
    pub fn record_received(&self, bytes: u64) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a message forwarded to the producer
    #[inline]
    pub fn record_forwarded(&self, bytes: u64) {
        self.messages_forwarded.fetch_add(1, Ordering::Relaxed);
        self.bytes_forwarded.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a message dropped by the chain
    #[inline]
    pub fn record_dropped(&self) {
        self.messages_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a kept message lost to a closed producer
    #[inline]
    pub fn record_forward_failure(&self) {
        self.forward_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a point-in-time snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_received: self.messages_received.load(Ordering::Relaxed),
            messages_forwarded: self.messages_forwarded.load(Ordering::Relaxed),
            messages_dropped: self.messages_dropped.load(Ordering::Relaxed),
            forward_failures: self.forward_failures.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            bytes_forwarded: self.bytes_forwarded.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of worker metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    /// Messages received from consumers
    pub messages_received: u64,
    /// Messages forwarded to the producer
    pub messages_forwarded: u64,
    /// Messages dropped by the chain
    pub messages_dropped: u64,
    /// Kept messages lost to a closed producer
    pub forward_failures: u64,
    /// Payload bytes received
    pub bytes_received: u64,
    /// Payload bytes forwarded
    pub bytes_forwarded: u64,
}

impl MetricsSnapshot {
    /// Fraction of received messages the chain dropped (0.0 - 1.0)
    ///
    /// Returns None if no messages have been received.
    pub fn drop_rate(&self) -> Option<f64> {
        if self.messages_received == 0 {
            None
        } else {
            Some(self.messages_dropped as f64 / self.messages_received as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let metrics = WorkerMetrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_record_received() {
        let metrics = WorkerMetrics::new();
        metrics.record_received(100);
        metrics.record_received(50);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.messages_received, 2);
        assert_eq!(snapshot.bytes_received, 150);
    }

    #[test]
    fn test_record_outcomes() {
        let metrics = WorkerMetrics::new();
        metrics.record_forwarded(20);
        metrics.record_dropped();
        metrics.record_dropped();
        metrics.record_forward_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.messages_forwarded, 1);
        assert_eq!(snapshot.bytes_forwarded, 20);
        assert_eq!(snapshot.messages_dropped, 2);
        assert_eq!(snapshot.forward_failures, 1);
    }

    #[test]
    fn test_drop_rate() {
        let snapshot = MetricsSnapshot {
            messages_received: 4,
            messages_dropped: 1,
            ..Default::default()
        };
        assert_eq!(snapshot.drop_rate(), Some(0.25));
        assert_eq!(MetricsSnapshot::default().drop_rate(), None);
    }
}
