//! Fixed-window rate limiting for the public redemption endpoint.
//!
//! The limiter is an injected component rather than a process global; the
//! in-memory implementation below suits single-process deployments, and a
//! store-backed implementation can replace it behind the same trait for
//! multi-process ones. Counters are abuse-damping only; losing them on
//! restart is acceptable.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    /// Whether the request may proceed.
    pub allowed: bool,
    /// Requests left in the current window.
    pub remaining: u32,
    /// When the current window resets.
    pub reset_at: DateTime<Utc>,
    /// Seconds the caller should wait; set only when denied.
    pub retry_after_seconds: Option<u64>,
}

/// Per-key request throttling.
pub trait RateLimiter: Send + Sync + std::fmt::Debug + 'static {
    /// Record one request against `key` and decide whether it may proceed.
    fn check(&self, key: &str) -> RateLimitDecision;
}

/// Entry count above which elapsed windows are swept before inserting.
const EVICT_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// In-memory fixed-window limiter.
///
/// Windows reset lazily on the next check after they elapse; wholly
/// elapsed windows for keys never seen again are swept once the map grows
/// past a threshold, bounding memory by distinct active keys.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    windows: DashMap<String, Window>,
    max_requests: u32,
    window: Duration,
}

impl FixedWindowLimiter {
    /// Create a limiter allowing `max_requests` per `window_seconds`.
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window: Duration::seconds(window_seconds as i64),
        }
    }

    fn evict_elapsed(&self, now: DateTime<Utc>) {
        if self.windows.len() > EVICT_THRESHOLD {
            self.windows.retain(|_, w| w.reset_at > now);
        }
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn check(&self, key: &str) -> RateLimitDecision {
        let now = Utc::now();
        self.evict_elapsed(now);

        // The entry guard serializes concurrent checks for the same key, so
        // increments never undercount.
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            reset_at: now + self.window,
        });

        if entry.reset_at <= now {
            entry.count = 0;
            entry.reset_at = now + self.window;
        }
        entry.count += 1;

        let allowed = entry.count <= self.max_requests;
        let retry_after_seconds = if allowed {
            None
        } else {
            let millis = (entry.reset_at - now).num_milliseconds().max(0) as u64;
            Some(millis.div_ceil(1000).max(1))
        };

        RateLimitDecision {
            allowed,
            remaining: self.max_requests.saturating_sub(entry.count),
            reset_at: entry.reset_at,
            retry_after_seconds,
        }
    }
}
