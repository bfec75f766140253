//! Blood splatters: decorative items that delete themselves after a short random lifespan.

use core::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;
use shardkeep_core::timer::{TimerError, delay_from_secs_f64};
use shardkeep_persist::{PersistError, RecordReader, RecordWriter, Versioned};
use shardkeep_types::Point3D;

use crate::base::ItemBase;

/// Art ids a blood splatter may use.
pub const BLOOD_GRAPHICS: [u16; 7] = [0x1645, 0x122A, 0x122B, 0x122C, 0x122D, 0x122E, 0x122F];

/// A blood splatter that deletes itself after a short random lifespan.
///
/// The lifespan is drawn again on every load; the remaining time is not
/// saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blood;

impl Blood {
    /// Fixed, visible base layer using `graphic`.
    pub const fn base(graphic: u16, location: Point3D) -> ItemBase {
        ItemBase::new(graphic, location).fixed()
    }

    /// Pick one of [`BLOOD_GRAPHICS`].
    pub fn random_graphic<R: Rng>(rng: &mut R) -> u16 {
        BLOOD_GRAPHICS.choose(rng).copied().unwrap_or(0x1645)
    }

    /// Draw a lifespan uniformly from `min_secs..=max_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::InvalidDuration`] if the bounds are negative
    /// or not finite.
    pub fn random_lifespan<R: Rng>(
        rng: &mut R,
        min_secs: f64,
        max_secs: f64,
    ) -> Result<Duration, TimerError> {
        let secs = if max_secs > min_secs {
            rng.random_range(min_secs..=max_secs)
        } else {
            min_secs
        };
        delay_from_secs_f64(secs)
    }
}

impl Versioned for Blood {
    const SCHEMA: &'static str = "blood";
    const CURRENT_VERSION: u32 = 0;

    fn write_fields(&self, _writer: &mut RecordWriter) {}

    fn read_fields(_version: u32, _reader: &mut RecordReader<'_>) -> Result<Self, PersistError> {
        Ok(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn lifespan_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let span = Blood::random_lifespan(&mut rng, 3.0, 6.0).unwrap();
            assert!(span >= Duration::from_secs(3));
            assert!(span <= Duration::from_secs(6));
        }
    }

    #[test]
    fn equal_bounds_give_exact_lifespan() {
        let mut rng = StdRng::seed_from_u64(7);
        let span = Blood::random_lifespan(&mut rng, 3.0, 3.0).unwrap();
        assert_eq!(span, Duration::from_secs(3));
    }

    #[test]
    fn negative_lifespan_is_invalid() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = Blood::random_lifespan(&mut rng, -1.0, -1.0).unwrap_err();
        assert!(matches!(err, TimerError::InvalidDuration { .. }));
    }

    #[test]
    fn graphic_comes_from_the_list() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert!(BLOOD_GRAPHICS.contains(&Blood::random_graphic(&mut rng)));
        }
    }

    #[test]
    fn blood_is_fixed_in_place() {
        let base = Blood::base(0x122A, Point3D::default());
        assert!(!base.movable);
        assert!(base.visible);
    }
}
