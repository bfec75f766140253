//! Shared run control for the timing loop.
//!
//! [`ShardControl`] is wrapped in [`Arc`](std::sync::Arc) and shared between
//! the timing loop and the engine's signal handler. The stop flag is atomic
//! so the loop can poll it without locking.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// Reason why the timing loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// A stop was requested through [`ShardControl::request_stop`].
    StopRequested,
}

/// Shared control state for one running shard.
#[derive(Debug)]
pub struct ShardControl {
    /// Wakes a sleeping loop when a stop is requested.
    wake: Notify,

    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Real-time milliseconds between iterations (at least 1).
    tick_interval_ms: u64,

    /// Maximum number of loop iterations (0 = unlimited).
    max_ticks: u64,
}

impl ShardControl {
    /// Create control state with the given tick interval and iteration cap.
    ///
    /// A zero interval is raised to 1 ms.
    pub fn new(tick_interval_ms: u64, max_ticks: u64) -> Self {
        Self {
            wake: Notify::new(),
            stop_requested: AtomicBool::new(false),
            tick_interval_ms: tick_interval_ms.max(1),
            max_ticks,
        }
    }

    /// Request a clean stop. The loop exits at its next check.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.wake.notify_waiters();
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Resolve once a stop has been requested.
    pub async fn stopped(&self) {
        loop {
            // Created before the check so a concurrent wake is not lost.
            let notified = self.wake.notified();
            if self.is_stop_requested() {
                return;
            }
            notified.await;
        }
    }

    /// Real-time milliseconds between loop iterations.
    pub const fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    /// Get the configured iteration cap (0 = unlimited).
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    /// Whether `ticks` iterations exhaust the configured cap.
    pub const fn tick_limit_reached(&self, ticks: u64) -> bool {
        self.max_ticks > 0 && ticks >= self.max_ticks
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn stop_flag_is_sticky() {
        let control = ShardControl::new(50, 0);
        assert!(!control.is_stop_requested());
        control.request_stop();
        assert!(control.is_stop_requested());
    }

    #[test]
    fn zero_tick_interval_is_raised() {
        assert_eq!(ShardControl::new(0, 0).tick_interval_ms(), 1);
        assert_eq!(ShardControl::new(20, 0).tick_interval_ms(), 20);
    }

    #[test]
    fn zero_max_ticks_means_unbounded() {
        let unbounded = ShardControl::new(50, 0);
        assert!(!unbounded.tick_limit_reached(u64::MAX));
        let bounded = ShardControl::new(50, 3);
        assert!(!bounded.tick_limit_reached(2));
        assert!(bounded.tick_limit_reached(3));
    }

    #[tokio::test]
    async fn stop_releases_a_waiting_task() {
        let control = Arc::new(ShardControl::new(50, 0));
        let waiter = {
            let control = Arc::clone(&control);
            tokio::spawn(async move { control.stopped().await })
        };
        tokio::task::yield_now().await;
        control.request_stop();
        assert!(waiter.await.is_ok());
    }
}
