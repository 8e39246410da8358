//! Rate Limiting
//!
//! Sliding-window admission control in front of every outbound API call.
//!
//! Hosted instances enforce a per-credential request ceiling (gitlab.com:
//! 2000 requests/minute for authenticated users). The limiter tracks the
//! trailing 60 seconds of request instants and, once a high-water mark is
//! crossed, suspends the caller for a full window before admitting the
//! next request. This is deliberately a single-threshold backoff rather
//! than a token bucket: requests are issued serially, so the worst case
//! is added latency, never a failed call.
//!
//! The limiter is plain owned state, injected into whatever issues the
//! requests. Concurrent runs that share one API credential must share one
//! limiter instance (behind a mutex) to honour the global ceiling; runs
//! on separate credentials can isolate theirs.

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, warn};
use tokio::time::{sleep, Instant};

/// Width of the sliding window
pub const WINDOW: Duration = Duration::from_secs(60);

/// Default high-water mark, conservative against a 2000/minute ceiling
pub const DEFAULT_HIGH_WATER: usize = 1900;

/// Sliding-window rate limiter
#[derive(Debug)]
pub struct RateLimiter {
    window: VecDeque<Instant>,
    high_water: usize,
}

impl RateLimiter {
    /// Create a limiter with the default high-water mark
    pub fn new() -> Self {
        Self::with_high_water(DEFAULT_HIGH_WATER)
    }

    /// Create a limiter with a custom high-water mark
    pub fn with_high_water(high_water: usize) -> Self {
        Self {
            window: VecDeque::new(),
            high_water,
        }
    }

    /// Block until it is safe to issue one more request, then record it
    ///
    /// Never fails; the worst case is a full 60-second suspension. The
    /// request instant is recorded on every call, including calls that
    /// had to wait.
    pub async fn admit(&mut self) {
        let now = Instant::now();
        while let Some(oldest) = self.window.front() {
            if now.duration_since(*oldest) >= WINDOW {
                self.window.pop_front();
            } else {
                break;
            }
        }

        if self.window.len() > self.high_water {
            warn!(
                "Request window holds {} entries (high-water {}), suspending for {}s",
                self.window.len(),
                self.high_water,
                WINDOW.as_secs()
            );
            sleep(WINDOW).await;
            debug!("Rate-limit suspension over, resuming requests");
        }

        self.window.push_back(Instant::now());
    }

    /// Number of requests currently inside the trailing window
    ///
    /// Counts entries as of the last `admit`; stale entries are pruned on
    /// the next call, not eagerly.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_admit_records_every_request() {
        let mut limiter = RateLimiter::new();
        for _ in 0..5 {
            limiter.admit().await;
        }
        assert_eq!(limiter.window_len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_admit_below_high_water_does_not_wait() {
        let mut limiter = RateLimiter::with_high_water(10);
        let start = Instant::now();
        for _ in 0..10 {
            limiter.admit().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_admit_above_high_water_suspends_for_full_window() {
        let mut limiter = RateLimiter::with_high_water(2);
        let start = Instant::now();
        // Three admits fill the window past the mark; the fourth must wait.
        for _ in 0..4 {
            limiter.admit().await;
        }
        assert!(start.elapsed() >= WINDOW);
        assert_eq!(limiter.window_len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entries_are_pruned() {
        let mut limiter = RateLimiter::with_high_water(2);
        for _ in 0..3 {
            limiter.admit().await;
        }
        sleep(WINDOW).await;
        // The three old entries have aged out, so this admit is free.
        let start = Instant::now();
        limiter.admit().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.window_len(), 1);
    }
}
