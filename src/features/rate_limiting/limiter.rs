//! Sliding-window limiter keyed by Discord user id
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Keyed by user id alone
//! - 1.0.0: Initial release with per-user sliding window rate limiting

use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct RateLimiter {
    requests: DashMap<u64, Vec<Instant>>,
    max_requests: usize,
    time_window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, time_window: Duration) -> Self {
        RateLimiter {
            requests: DashMap::new(),
            max_requests,
            time_window,
        }
    }

    pub fn per_minute(max_requests: usize) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }

    /// Record a request for `user_id`. Returns false if the window is already full.
    pub async fn check_rate_limit(&self, user_id: u64) -> bool {
        let now = Instant::now();
        let mut entry = self.requests.entry(user_id).or_default();

        entry.retain(|&time| now.duration_since(time) < self.time_window);

        if entry.len() >= self.max_requests {
            false
        } else {
            entry.push(now);
            true
        }
    }

    /// Time until `user_id` may send another request
    pub fn retry_after(&self, user_id: u64) -> Option<Duration> {
        let entry = self.requests.get(&user_id)?;
        if entry.len() < self.max_requests {
            return None;
        }
        let oldest = entry.first()?;
        self.time_window.checked_sub(oldest.elapsed())
    }
}
