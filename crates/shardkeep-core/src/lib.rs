//! Game clock, delayed actions, configuration, and the timing loop for
//! the Shardkeep item server.
//!
//! # Modules
//!
//! - [`clock`] -- Monotonic virtual world time.
//! - [`timer`] -- [`TimerQueue`], the one-shot delayed-action scheduler, and
//!   the [`TimerHost`] driver that fires due actions in deadline order.
//! - [`config`] -- Configuration loading from `shardkeep-config.yaml` into
//!   strongly-typed structs.
//! - [`control`] -- Shared run control (stop requests, tick interval).
//! - [`runner`] -- The async timing loop that advances a host in real time.
//!
//! [`TimerQueue`]: timer::TimerQueue
//! [`TimerHost`]: timer::TimerHost

pub mod clock;
pub mod config;
pub mod control;
pub mod runner;
pub mod timer;
