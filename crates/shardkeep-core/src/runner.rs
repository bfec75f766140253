//! The timing loop: the single shared facility that fires delayed actions.
//!
//! [`run_shard`] owns the host for its whole run. Each iteration it:
//!
//! - exits on a stop request,
//! - advances the host clock by the real time elapsed since the previous
//!   iteration, firing due actions in deadline order,
//! - reports a [`TickSummary`] to the [`TickCallback`],
//! - sleeps for the tick interval, shortened to the resolution of the
//!   finest pending priority tier.
//!
//! Real time is measured with [`tokio::time::Instant`], so tests running on
//! a paused tokio clock are fully deterministic.

use core::time::Duration;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::control::{RunEndReason, ShardControl};
use crate::timer::{self, TimerError, TimerHost};

/// Errors that can occur during the timing loop.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Advancing the host clock failed.
    #[error("timer error: {source}")]
    Timer {
        /// The underlying timer error.
        #[from]
        source: TimerError,
    },
}

/// What happened during one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// 1-based iteration number.
    pub tick: u64,
    /// World time after the iteration.
    pub now: Duration,
    /// Delayed actions fired during the iteration.
    pub fired: usize,
    /// Delayed actions still pending after the iteration.
    pub pending: usize,
}

/// Result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    /// Why the loop ended.
    pub end_reason: RunEndReason,
    /// Number of iterations executed.
    pub total_ticks: u64,
    /// Total delayed actions fired.
    pub total_fired: u64,
    /// World time when the loop ended.
    pub final_time: Duration,
}

/// Callback invoked after each loop iteration.
///
/// The engine uses this to drain world notices and to autosave.
pub trait TickCallback<H> {
    /// Called after an iteration completes.
    fn on_tick(&mut self, summary: &TickSummary, host: &mut H);
}

/// A callback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl<H> TickCallback<H> for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _host: &mut H) {}
}

/// Run the timing loop until the tick cap is reached or a stop is requested.
///
/// # Errors
///
/// Returns [`RunnerError`] if the host clock cannot be advanced.
pub async fn run_shard<H: TimerHost>(
    host: &mut H,
    control: &Arc<ShardControl>,
    callback: &mut dyn TickCallback<H>,
) -> Result<RunResult, RunnerError> {
    let mut total_ticks: u64 = 0;
    let mut total_fired: u64 = 0;
    let mut last = Instant::now();

    info!(
        max_ticks = control.max_ticks(),
        tick_interval_ms = control.tick_interval_ms(),
        world_time = ?host.clock().now(),
        "timing loop starting"
    );

    loop {
        if control.is_stop_requested() {
            return Ok(finish(host, RunEndReason::StopRequested, total_ticks, total_fired));
        }

        let started = Instant::now();
        let elapsed = started.saturating_duration_since(last);
        last = started;

        let fired = timer::advance(host, elapsed)?;
        total_ticks = total_ticks.saturating_add(1);
        total_fired = total_fired.saturating_add(u64::try_from(fired).unwrap_or(u64::MAX));

        let summary = TickSummary {
            tick: total_ticks,
            now: host.clock().now(),
            fired,
            pending: host.timers().len(),
        };
        if fired > 0 {
            debug!(
                tick = summary.tick,
                fired = summary.fired,
                pending = summary.pending,
                "delayed actions fired"
            );
        }
        callback.on_tick(&summary, host);

        if control.tick_limit_reached(total_ticks) {
            return Ok(finish(host, RunEndReason::MaxTicksReached, total_ticks, total_fired));
        }

        let pause = sleep_interval(host, control);
        tokio::select! {
            () = tokio::time::sleep(pause) => {}
            () = control.stopped() => {}
        }
    }
}

/// Compute how long to sleep before the next iteration.
///
/// The configured interval is shortened to the resolution of the finest
/// pending priority tier. `EveryTick` actions are served at the interval.
fn sleep_interval<H: TimerHost>(host: &mut H, control: &ShardControl) -> Duration {
    let interval = Duration::from_millis(control.tick_interval_ms());
    match host.timers().finest_priority() {
        Some(priority) if priority.resolution() > Duration::ZERO => {
            interval.min(priority.resolution())
        }
        _ => interval,
    }
}

fn finish<H: TimerHost>(
    host: &H,
    end_reason: RunEndReason,
    total_ticks: u64,
    total_fired: u64,
) -> RunResult {
    let result = RunResult {
        end_reason,
        total_ticks,
        total_fired,
        final_time: host.clock().now(),
    };
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        total_fired = result.total_fired,
        final_time = ?result.final_time,
        "timing loop ended"
    );
    result
}
