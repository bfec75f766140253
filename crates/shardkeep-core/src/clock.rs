//! World clock for the Shardkeep item server.
//!
//! The clock is the single source of truth for "now" inside the world. It
//! measures virtual time since the world epoch as a [`Duration`], so tests
//! can drive it precisely and the async loop can feed it real elapsed time.
//!
//! # Design Principles
//!
//! - Time never moves backwards. Deadlines computed from an earlier `now`
//!   stay valid.
//! - All arithmetic is checked; overflow is an error, not a wrap.

use core::time::Duration;

/// Errors that can occur during clock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// The clock would overflow [`Duration`].
    #[error("world clock overflow: cannot advance by {by:?} from {now:?}")]
    Overflow {
        /// Time before the failed advance.
        now: Duration,
        /// Requested step.
        by: Duration,
    },

    /// An attempt was made to move the clock to an earlier time.
    #[error("world clock cannot move backwards from {now:?} to {target:?}")]
    WentBackwards {
        /// Current time.
        now: Duration,
        /// Rejected target time.
        target: Duration,
    },
}

/// Monotonic virtual clock measuring time since the world epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameClock {
    now: Duration,
}

impl GameClock {
    /// Create a clock at the world epoch.
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Create a clock already at `now` (used when restoring a save).
    pub const fn starting_at(now: Duration) -> Self {
        Self { now }
    }

    /// Current world time.
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward by `by`. Returns the new time.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Overflow`] if the result does not fit.
    pub fn advance(&mut self, by: Duration) -> Result<Duration, ClockError> {
        self.now = self
            .now
            .checked_add(by)
            .ok_or(ClockError::Overflow { now: self.now, by })?;
        Ok(self.now)
    }

    /// Set the clock to `target`, which must not be earlier than now.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::WentBackwards`] if `target` is in the past.
    pub fn set(&mut self, target: Duration) -> Result<(), ClockError> {
        if target < self.now {
            return Err(ClockError::WentBackwards {
                now: self.now,
                target,
            });
        }
        self.now = target;
        Ok(())
    }

    /// Time elapsed since `earlier`, saturating at zero.
    pub const fn since(&self, earlier: Duration) -> Duration {
        self.now.saturating_sub(earlier)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_epoch() {
        let clock = GameClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn clock_advances() {
        let mut clock = GameClock::new();
        clock.advance(Duration::from_millis(2900)).unwrap();
        assert_eq!(clock.now(), Duration::from_millis(2900));
        clock.advance(Duration::from_millis(100)).unwrap();
        assert_eq!(clock.now(), Duration::from_secs(3));
    }

    #[test]
    fn clock_refuses_to_go_backwards() {
        let mut clock = GameClock::starting_at(Duration::from_secs(10));
        let err = clock.set(Duration::from_secs(9)).unwrap_err();
        assert_eq!(
            err,
            ClockError::WentBackwards {
                now: Duration::from_secs(10),
                target: Duration::from_secs(9),
            }
        );
        assert!(clock.set(Duration::from_secs(10)).is_ok());
    }

    #[test]
    fn clock_overflow_is_an_error() {
        let mut clock = GameClock::starting_at(Duration::MAX);
        assert!(clock.advance(Duration::from_nanos(1)).is_err());
        assert_eq!(clock.now(), Duration::MAX);
    }

    #[test]
    fn since_saturates() {
        let clock = GameClock::starting_at(Duration::from_secs(1));
        assert_eq!(clock.since(Duration::from_secs(5)), Duration::ZERO);
        assert_eq!(clock.since(Duration::ZERO), Duration::from_secs(1));
    }
}
