use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

use crate::metrics::{SWEPT_RECORDS, TRACKED_CLIENTS};

// Rate limit record - tracks requests per client key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRecord {
    pub count: u32,
    pub window_start: Instant,
}

impl RateRecord {
    fn expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) >= window
    }
}

/// Fixed-window request counter keyed by client address.
///
/// Records are created lazily by [`RateLimiter::admit`] and only removed by
/// [`RateLimiter::sweep`], once the table holds more than `max_records` keys.
pub struct RateLimiter {
    records: DashMap<String, RateRecord>,
    limit: u32,
    window: Duration,
    max_records: usize,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration, max_records: usize) -> Self {
        Self {
            records: DashMap::new(),
            limit,
            window,
            max_records,
        }
    }

    /// Counts one request for `key` and says whether it may proceed.
    ///
    /// The entry guard is held across the whole check-and-increment, so two
    /// requests for the same key can't both take the last slot.
    pub fn admit(&self, key: &str, now: Instant) -> bool {
        let mut record = self
            .records
            .entry(key.to_string())
            .or_insert(RateRecord {
                count: 0,
                window_start: now,
            });

        // window over..? start a fresh one
        if record.expired(now, self.window) {
            record.count = 0;
            record.window_start = now;
        }

        // saturated, leave the record alone
        if record.count >= self.limit {
            return false;
        }

        record.count += 1;
        true
    }

    /// Drops expired records, but only once the table is over capacity.
    /// Returns how many records were removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.records.len();
        if before <= self.max_records {
            return 0;
        }

        self.records
            .retain(|_, record| !record.expired(now, self.window));
        before.saturating_sub(self.records.len())
    }

    pub fn record(&self, key: &str) -> Option<RateRecord> {
        self.records.get(key).map(|r| *r)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }
}

// Sweeper - runs every `every` until shutdown
pub async fn sweeper(limiter: Arc<RateLimiter>, every: Duration) {
    let mut interval = interval(every);

    info!(
        interval = ?every,
        limit = limiter.limit(),
        window = ?limiter.window(),
        max_records = limiter.max_records(),
        "rate limit sweeper started"
    );

    loop {
        interval.tick().await;

        let removed = limiter.sweep(Instant::now());
        let remaining = limiter.len();
        TRACKED_CLIENTS.set(remaining as f64);

        if removed > 0 {
            SWEPT_RECORDS.inc_by(removed as f64);
            info!(removed, remaining, "swept expired rate limit records");
        }
    }
}
