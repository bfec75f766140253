//! Enumeration types shared across the Shardkeep workspace.
//!
//! Every enumeration that reaches a save file carries an explicit, stable
//! numeric code. Variant order may change freely; codes may not.

use core::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Timer priority tiers
// ---------------------------------------------------------------------------

/// Coarse scheduling-resolution hint attached to every delayed action.
///
/// A tier states how precisely the timing loop needs to honour a deadline.
/// Deadlines themselves are always exact; the tier only bounds how long
/// the loop may sleep between checks while the action is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerPriority {
    /// Checked on every loop iteration.
    EveryTick,
    /// 10 ms resolution.
    TenMs,
    /// 25 ms resolution.
    TwentyFiveMs,
    /// 50 ms resolution.
    FiftyMs,
    /// 250 ms resolution.
    TwoFiftyMs,
    /// One second resolution.
    OneSecond,
    /// Five second resolution.
    FiveSeconds,
    /// One minute resolution.
    OneMinute,
}

impl TimerPriority {
    /// Maximum lateness the loop tolerates for an action in this tier.
    pub const fn resolution(self) -> Duration {
        match self {
            Self::EveryTick => Duration::ZERO,
            Self::TenMs => Duration::from_millis(10),
            Self::TwentyFiveMs => Duration::from_millis(25),
            Self::FiftyMs => Duration::from_millis(50),
            Self::TwoFiftyMs => Duration::from_millis(250),
            Self::OneSecond => Duration::from_secs(1),
            Self::FiveSeconds => Duration::from_secs(5),
            Self::OneMinute => Duration::from_secs(60),
        }
    }

    /// Pick a tier appropriate for a delay of the given length.
    ///
    /// Long delays tolerate coarse checks; short ones need fine checks.
    /// `OneMinute` is never chosen automatically -- callers opt into it.
    pub const fn for_delay(delay: Duration) -> Self {
        let ms = delay.as_millis();
        if ms >= 60_000 {
            Self::FiveSeconds
        } else if ms >= 10_000 {
            Self::OneSecond
        } else if ms >= 5_000 {
            Self::TwoFiftyMs
        } else if ms >= 2_500 {
            Self::FiftyMs
        } else if ms >= 1_000 {
            Self::TwentyFiveMs
        } else if ms >= 500 {
            Self::TenMs
        } else {
            Self::EveryTick
        }
    }
}

// ---------------------------------------------------------------------------
// Item kinds
// ---------------------------------------------------------------------------

/// The class of an item placed in the world.
///
/// The persisted code selects which class record decoder runs on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Decorative blood splatter that deletes itself after a few seconds.
    Blood,
    /// Invisible tile reporting how long an actor took between crossings.
    SpeedProbe,
    /// Invisible tile refusing items dropped on its location.
    DropBlocker,
    /// Gate that offers resurrection to dead actors walking over it.
    ResurrectionGate,
    /// Throwable decorative keepsake, consumed by a single throw.
    Keepsake,
    /// Stackable resource that can be split into smaller stacks.
    StackableResource,
}

impl ItemKind {
    /// Stable code written into save files.
    pub const fn code(self) -> u16 {
        match self {
            Self::Blood => 1,
            Self::SpeedProbe => 2,
            Self::DropBlocker => 3,
            Self::ResurrectionGate => 4,
            Self::Keepsake => 5,
            Self::StackableResource => 6,
        }
    }

    /// Look up a kind by its persisted code.
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(Self::Blood),
            2 => Some(Self::SpeedProbe),
            3 => Some(Self::DropBlocker),
            4 => Some(Self::ResurrectionGate),
            5 => Some(Self::Keepsake),
            6 => Some(Self::StackableResource),
            _ => None,
        }
    }
}

impl core::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Blood => write!(f, "blood"),
            Self::SpeedProbe => write!(f, "speed_probe"),
            Self::DropBlocker => write!(f, "drop_blocker"),
            Self::ResurrectionGate => write!(f, "resurrection_gate"),
            Self::Keepsake => write!(f, "keepsake"),
            Self::StackableResource => write!(f, "stackable_resource"),
        }
    }
}

// ---------------------------------------------------------------------------
// Actor kinds
// ---------------------------------------------------------------------------

/// Whether an actor is driven by a connected player or by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// A player-controlled character.
    Player,
    /// A server-controlled creature.
    Creature,
}

// ---------------------------------------------------------------------------
// Stackable resources
// ---------------------------------------------------------------------------

/// The material a stackable resource item is made of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Iron ingots. Stacks written before resource kinds existed load as iron.
    #[default]
    Iron,
    /// Copper ingots.
    Copper,
    /// Cut logs.
    Log,
    /// Tanned leather.
    Leather,
    /// Spun cloth.
    Cloth,
}

impl ResourceKind {
    /// Stable code written into save files.
    pub const fn code(self) -> u16 {
        match self {
            Self::Iron => 0,
            Self::Copper => 1,
            Self::Log => 2,
            Self::Leather => 3,
            Self::Cloth => 4,
        }
    }

    /// Look up a resource by its persisted code.
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::Iron),
            1 => Some(Self::Copper),
            2 => Some(Self::Log),
            3 => Some(Self::Leather),
            4 => Some(Self::Cloth),
            _ => None,
        }
    }
}
