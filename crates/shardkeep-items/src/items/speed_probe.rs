//! Floor marker reporting how long an actor took between two crossings.

use core::time::Duration;

use shardkeep_persist::{PersistError, RecordReader, RecordWriter, Versioned};
use shardkeep_types::{Actor, Point3D};

use crate::base::ItemBase;

/// Art id of a speed probe tile.
pub const SPEED_PROBE_GRAPHIC: u16 = 0x1B7A;

/// An invisible tile that tells players how long since they last crossed
/// one.
///
/// The mark lives on the actor, so any two probes form a stopwatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeedProbe;

impl SpeedProbe {
    /// Hidden, fixed base layer.
    pub const fn base(location: Point3D) -> ItemBase {
        ItemBase::new(SPEED_PROBE_GRAPHIC, location).fixed().hidden()
    }

    /// Record `actor` crossing a probe at world time `now`.
    ///
    /// Returns the report for the actor, or `None` if the actor is not a
    /// player. An actor without a mark is timed from the world epoch.
    pub fn cross(actor: &mut Actor, now: Duration) -> Option<String> {
        if !actor.is_player() {
            return None;
        }
        let since = actor.last_move_mark.unwrap_or(Duration::ZERO);
        actor.last_move_mark = Some(now);
        Some(Self::format_elapsed(now.saturating_sub(since)))
    }

    /// Render an elapsed span as zero-padded seconds, e.g. `05.50 seconds`.
    pub fn format_elapsed(elapsed: Duration) -> String {
        format!("{:05.2} seconds", elapsed.as_secs_f64())
    }
}

impl Versioned for SpeedProbe {
    const SCHEMA: &'static str = "speed_probe";
    const CURRENT_VERSION: u32 = 0;

    fn write_fields(&self, _writer: &mut RecordWriter) {}

    fn read_fields(_version: u32, _reader: &mut RecordReader<'_>) -> Result<Self, PersistError> {
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use shardkeep_types::ActorKind;

    use super::*;

    #[test]
    fn crossings_report_the_gap() {
        let mut runner = Actor::new("Dupre", ActorKind::Player, Point3D::default());
        let first = SpeedProbe::cross(&mut runner, Duration::from_secs(2));
        assert_eq!(first.as_deref(), Some("02.00 seconds"));

        let second = SpeedProbe::cross(&mut runner, Duration::from_millis(7500));
        assert_eq!(second.as_deref(), Some("05.50 seconds"));
        assert_eq!(runner.last_move_mark, Some(Duration::from_millis(7500)));
    }

    #[test]
    fn creatures_are_not_timed() {
        let mut rat = Actor::new("a sewer rat", ActorKind::Creature, Point3D::default());
        assert_eq!(SpeedProbe::cross(&mut rat, Duration::from_secs(1)), None);
        assert_eq!(rat.last_move_mark, None);
    }

    #[test]
    fn long_gaps_widen_the_field() {
        assert_eq!(
            SpeedProbe::format_elapsed(Duration::from_millis(123_450)),
            "123.45 seconds"
        );
    }
}
