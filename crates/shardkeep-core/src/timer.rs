//! One-shot delayed actions.
//!
//! A [`TimerQueue`] holds callbacks that must run once, after a delay, with
//! mutable access to the host that owns the queue (usually the world). The
//! queue never runs anything itself: a [`TimerHost`] is driven forward with
//! [`advance`] or [`advance_to`], which pops due actions in deadline order
//! and runs each one against the host.
//!
//! # Lifecycle
//!
//! ```text
//! schedule --> Scheduled --(deadline reached)--> Fired
//!                  |
//!                  +--------(cancel)-----------> Cancelled
//! ```
//!
//! Both end states are terminal. Cancelling a fired or cancelled action is
//! a no-op. Callbacks only ever run from the driver, never from inside
//! [`TimerQueue::schedule`].

use core::time::Duration;
use std::collections::{BTreeMap, HashMap};

use shardkeep_types::TimerPriority;
use tracing::trace;

use crate::clock::{ClockError, GameClock};

/// Errors that can occur when scheduling or driving delayed actions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimerError {
    /// The requested delay is negative or not a finite number of seconds.
    #[error("invalid timer duration: {secs} seconds")]
    InvalidDuration {
        /// The rejected delay in seconds.
        secs: f64,
    },

    /// `now + delay` does not fit in a [`Duration`].
    #[error("timer deadline overflow: {delay:?} after {now:?}")]
    DeadlineOverflow {
        /// Scheduling time.
        now: Duration,
        /// Requested delay.
        delay: Duration,
    },

    /// The host clock rejected a move.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },
}

/// Convert a delay given in (possibly fractional) seconds into a [`Duration`].
///
/// # Errors
///
/// Returns [`TimerError::InvalidDuration`] for negative, NaN, infinite, or
/// unrepresentably large values.
pub fn delay_from_secs_f64(secs: f64) -> Result<Duration, TimerError> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(TimerError::InvalidDuration { secs });
    }
    Duration::try_from_secs_f64(secs).map_err(|_err| TimerError::InvalidDuration { secs })
}

/// Opaque handle identifying one scheduled action.
///
/// Handles are never reused, so a stale handle can be cancelled safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Sequence number of the action (monotonic per queue).
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Boxed callback run when a delayed action fires.
pub type Action<C> = Box<dyn FnOnce(&mut C)>;

struct Pending<C> {
    priority: TimerPriority,
    action: Action<C>,
}

/// An action whose deadline has been reached, popped from the queue.
pub struct DueAction<C> {
    /// Handle the action was scheduled under.
    pub handle: TimerHandle,
    /// The deadline the action was scheduled for.
    pub deadline: Duration,
    /// Priority tier the action was scheduled with.
    pub priority: TimerPriority,
    action: Action<C>,
}

impl<C> DueAction<C> {
    /// Run the callback against its host, consuming the action.
    pub fn run(self, host: &mut C) {
        (self.action)(host);
    }
}

impl<C> core::fmt::Debug for DueAction<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DueAction")
            .field("handle", &self.handle)
            .field("deadline", &self.deadline)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Deadline-ordered queue of one-shot actions over a host of type `C`.
///
/// Entries are keyed by `(deadline, sequence)`, so actions sharing a
/// deadline fire in the order they were scheduled.
pub struct TimerQueue<C> {
    next_sequence: u64,
    entries: BTreeMap<(Duration, u64), Pending<C>>,
    deadlines: HashMap<u64, Duration>,
}

impl<C> Default for TimerQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> core::fmt::Debug for TimerQueue<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("pending", &self.entries.len())
            .field("next_deadline", &self.next_deadline())
            .finish()
    }
}

impl<C> TimerQueue<C> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            next_sequence: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Register `action` to run once, `delay` after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::DeadlineOverflow`] if the deadline does not fit.
    pub fn schedule(
        &mut self,
        now: Duration,
        delay: Duration,
        priority: TimerPriority,
        action: impl FnOnce(&mut C) + 'static,
    ) -> Result<TimerHandle, TimerError> {
        let deadline = now
            .checked_add(delay)
            .ok_or(TimerError::DeadlineOverflow { now, delay })?;
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);

        self.entries.insert(
            (deadline, sequence),
            Pending {
                priority,
                action: Box::new(action),
            },
        );
        self.deadlines.insert(sequence, deadline);

        trace!(sequence, ?deadline, ?priority, "delayed action scheduled");
        Ok(TimerHandle(sequence))
    }

    /// Cancel a pending action.
    ///
    /// Returns `true` if the action was pending and is now cancelled, and
    /// `false` if it had already fired or been cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let Some(deadline) = self.deadlines.remove(&handle.0) else {
            return false;
        };
        let removed = self.entries.remove(&(deadline, handle.0)).is_some();
        if removed {
            trace!(sequence = handle.0, "delayed action cancelled");
        }
        removed
    }

    /// Whether the action is still waiting to fire.
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    /// Absolute deadline of a pending action.
    pub fn deadline(&self, handle: TimerHandle) -> Option<Duration> {
        self.deadlines.get(&handle.0).copied()
    }

    /// Time left before a pending action fires, measured from `now`.
    pub fn remaining(&self, handle: TimerHandle, now: Duration) -> Option<Duration> {
        self.deadline(handle)
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Priority tier of a pending action.
    pub fn priority(&self, handle: TimerHandle) -> Option<TimerPriority> {
        let deadline = self.deadline(handle)?;
        self.entries
            .get(&(deadline, handle.0))
            .map(|pending| pending.priority)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Finest priority tier among pending actions.
    pub fn finest_priority(&self) -> Option<TimerPriority> {
        self.entries.values().map(|pending| pending.priority).min()
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no actions are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return the earliest action whose deadline is at or before
    /// `now`, if any.
    pub fn pop_due(&mut self, now: Duration) -> Option<DueAction<C>> {
        let (&(deadline, sequence), _) = self.entries.first_key_value()?;
        if deadline > now {
            return None;
        }
        let pending = self.entries.remove(&(deadline, sequence))?;
        self.deadlines.remove(&sequence);
        Some(DueAction {
            handle: TimerHandle(sequence),
            deadline,
            priority: pending.priority,
            action: pending.action,
        })
    }
}

/// A host that owns a clock and a timer queue of callbacks over itself.
pub trait TimerHost: Sized + 'static {
    /// The host's clock.
    fn clock(&self) -> &GameClock;

    /// Mutable access to the host's clock.
    fn clock_mut(&mut self) -> &mut GameClock;

    /// Mutable access to the host's timer queue.
    fn timers(&mut self) -> &mut TimerQueue<Self>;

    /// Schedule `action` to run `delay` from the host's current time.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::DeadlineOverflow`] if the deadline does not fit.
    fn schedule_action(
        &mut self,
        delay: Duration,
        priority: TimerPriority,
        action: impl FnOnce(&mut Self) + 'static,
    ) -> Result<TimerHandle, TimerError> {
        let now = self.clock().now();
        self.timers().schedule(now, delay, priority, action)
    }
}

/// Advance the host's clock by `by`, firing every action that becomes due.
///
/// Returns the number of actions fired.
///
/// # Errors
///
/// Returns [`TimerError::Clock`] if the clock would overflow.
pub fn advance<H: TimerHost>(host: &mut H, by: Duration) -> Result<usize, TimerError> {
    let now = host.clock().now();
    let target = now
        .checked_add(by)
        .ok_or(ClockError::Overflow { now, by })?;
    advance_to(host, target)
}

/// Advance the host's clock to `target`, firing due actions in deadline
/// order.
///
/// Before each action runs the clock is set to that action's deadline, so
/// callbacks observe the time they were scheduled for. Actions scheduled by
/// a callback fire in the same call if their deadline is within `target`.
///
/// # Errors
///
/// Returns [`TimerError::Clock`] if `target` is earlier than the current time.
pub fn advance_to<H: TimerHost>(host: &mut H, target: Duration) -> Result<usize, TimerError> {
    let now = host.clock().now();
    if target < now {
        return Err(ClockError::WentBackwards { now, target }.into());
    }

    let mut fired: usize = 0;
    while let Some(due) = host.timers().pop_due(target) {
        let at = due.deadline.max(host.clock().now());
        host.clock_mut().set(at)?;
        trace!(
            sequence = due.handle.sequence(),
            deadline = ?due.deadline,
            priority = ?due.priority,
            "delayed action firing"
        );
        due.run(host);
        fired = fired.saturating_add(1);
    }

    host.clock_mut().set(target)?;
    Ok(fired)
}
