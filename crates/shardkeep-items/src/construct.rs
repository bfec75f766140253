//! Building items from a kind and an ordered list of primitive arguments.
//!
//! | Kind | Arguments |
//! |------|-----------|
//! | `blood` | `[]` random graphic, or `[Int graphic]` |
//! | `speed_probe`, `drop_blocker`, `resurrection_gate` | `[]` |
//! | `keepsake` | `[]`, or `[Text name]` |
//! | `stackable_resource` | `[]`, `[Int amount]`, or `[Int amount, Int resource]` |

use rand::Rng;
use shardkeep_types::{ItemKind, Point3D, ResourceKind};

use crate::base::ItemBase;
use crate::error::WorldError;
use crate::item::ItemBody;
use crate::items::{Blood, DropBlocker, Keepsake, ResurrectionGate, SpeedProbe, StackableResource};

/// One primitive construction argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructArg {
    /// Integer argument.
    Int(i64),
    /// Floating-point argument.
    Float(f64),
    /// String argument.
    Text(String),
    /// Boolean argument.
    Bool(bool),
}

struct Args<'a> {
    kind: ItemKind,
    args: &'a [ConstructArg],
}

impl Args<'_> {
    fn invalid(&self, index: usize, reason: impl Into<String>) -> WorldError {
        WorldError::InvalidArgument {
            kind: self.kind,
            index,
            reason: reason.into(),
        }
    }

    fn at_most(&self, count: usize) -> Result<(), WorldError> {
        if self.args.len() > count {
            return Err(self.invalid(count, format!("takes at most {count} arguments")));
        }
        Ok(())
    }

    fn int(&self, index: usize) -> Result<Option<i64>, WorldError> {
        match self.args.get(index) {
            None => Ok(None),
            Some(ConstructArg::Int(value)) => Ok(Some(*value)),
            Some(other) => Err(self.invalid(index, format!("expected an integer, got {other:?}"))),
        }
    }

    fn text(&self, index: usize) -> Result<Option<&str>, WorldError> {
        match self.args.get(index) {
            None => Ok(None),
            Some(ConstructArg::Text(value)) => Ok(Some(value.as_str())),
            Some(other) => Err(self.invalid(index, format!("expected text, got {other:?}"))),
        }
    }

    fn u16(&self, index: usize) -> Result<Option<u16>, WorldError> {
        self.int(index)?
            .map(|value| {
                u16::try_from(value)
                    .map_err(|err| self.invalid(index, format!("{value} is out of range: {err}")))
            })
            .transpose()
    }
}

/// Build the base and class layers for a new item of `kind` at `location`.
///
/// # Errors
///
/// Returns [`WorldError::InvalidArgument`] if the arguments do not match
/// the kind's argument list.
pub fn build<R: Rng>(
    kind: ItemKind,
    location: Point3D,
    args: &[ConstructArg],
    rng: &mut R,
) -> Result<(ItemBase, ItemBody), WorldError> {
    let args = Args { kind, args };
    match kind {
        ItemKind::Blood => {
            args.at_most(1)?;
            let graphic = args.u16(0)?.unwrap_or_else(|| Blood::random_graphic(rng));
            Ok((Blood::base(graphic, location), ItemBody::Blood(Blood)))
        }
        ItemKind::SpeedProbe => {
            args.at_most(0)?;
            Ok((SpeedProbe::base(location), ItemBody::SpeedProbe(SpeedProbe)))
        }
        ItemKind::DropBlocker => {
            args.at_most(0)?;
            Ok((DropBlocker::base(location), ItemBody::DropBlocker(DropBlocker)))
        }
        ItemKind::ResurrectionGate => {
            args.at_most(0)?;
            Ok((
                ResurrectionGate::base(location),
                ItemBody::ResurrectionGate(ResurrectionGate),
            ))
        }
        ItemKind::Keepsake => {
            args.at_most(1)?;
            let mut base = Keepsake::base(location);
            if let Some(name) = args.text(0)? {
                base = base.with_name(name);
            }
            Ok((base, ItemBody::Keepsake(Keepsake::default())))
        }
        ItemKind::StackableResource => {
            args.at_most(2)?;
            let amount = match args.int(0)? {
                None => 1,
                Some(value) => u32::try_from(value)
                    .ok()
                    .filter(|amount| *amount > 0)
                    .ok_or_else(|| args.invalid(0, format!("amount must be positive, got {value}")))?,
            };
            let resource = match args.u16(1)? {
                None => ResourceKind::default(),
                Some(code) => ResourceKind::from_code(code)
                    .ok_or_else(|| args.invalid(1, format!("unknown resource code {code}")))?,
            };
            let pile = StackableResource::new(resource);
            Ok((pile.base(amount, location), ItemBody::StackableResource(pile)))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::items::BLOOD_GRAPHICS;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    #[test]
    fn blood_without_args_picks_a_listed_graphic() {
        let (base, body) = build(ItemKind::Blood, Point3D::default(), &[], &mut rng()).unwrap();
        assert!(BLOOD_GRAPHICS.contains(&base.graphic));
        assert_eq!(body.kind(), ItemKind::Blood);
    }

    #[test]
    fn blood_with_graphic_uses_it() {
        let args = [ConstructArg::Int(0x122C)];
        let (base, _) = build(ItemKind::Blood, Point3D::default(), &args, &mut rng()).unwrap();
        assert_eq!(base.graphic, 0x122C);
    }

    #[test]
    fn stack_takes_amount_and_resource() {
        let args = [ConstructArg::Int(25), ConstructArg::Int(3)];
        let (base, body) =
            build(ItemKind::StackableResource, Point3D::default(), &args, &mut rng()).unwrap();
        assert_eq!(base.amount, 25);
        assert_eq!(
            body,
            ItemBody::StackableResource(StackableResource::new(ResourceKind::Leather))
        );
    }

    #[test]
    fn zero_amount_is_rejected() {
        let args = [ConstructArg::Int(0)];
        let err = build(ItemKind::StackableResource, Point3D::default(), &args, &mut rng())
            .unwrap_err();
        assert!(matches!(err, WorldError::InvalidArgument { index: 0, .. }));
    }

    #[test]
    fn extra_arguments_are_rejected() {
        let args = [ConstructArg::Bool(true)];
        let err = build(ItemKind::DropBlocker, Point3D::default(), &args, &mut rng()).unwrap_err();
        assert!(matches!(err, WorldError::InvalidArgument { index: 0, .. }));
    }

    #[test]
    fn keepsake_name_must_be_text() {
        let args = [ConstructArg::Float(1.5)];
        let err = build(ItemKind::Keepsake, Point3D::default(), &args, &mut rng()).unwrap_err();
        assert!(matches!(err, WorldError::InvalidArgument { index: 0, .. }));

        let args = [ConstructArg::Text("a lock of hair".to_owned())];
        let (base, _) = build(ItemKind::Keepsake, Point3D::default(), &args, &mut rng()).unwrap();
        assert_eq!(base.name.as_deref(), Some("a lock of hair"));
    }
}
