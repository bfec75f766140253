//! A live item: identity, base layer, class body, and its pending timer.

use shardkeep_core::timer::TimerHandle;
use shardkeep_persist::{PersistError, VersionedRecord, decode, encode};
use shardkeep_types::{ItemId, ItemKind};

use crate::base::ItemBase;
use crate::items::{Blood, DropBlocker, Keepsake, ResurrectionGate, SpeedProbe, StackableResource};

/// The class layer of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemBody {
    /// See [`Blood`].
    Blood(Blood),
    /// See [`SpeedProbe`].
    SpeedProbe(SpeedProbe),
    /// See [`DropBlocker`].
    DropBlocker(DropBlocker),
    /// See [`ResurrectionGate`].
    ResurrectionGate(ResurrectionGate),
    /// See [`Keepsake`].
    Keepsake(Keepsake),
    /// See [`StackableResource`].
    StackableResource(StackableResource),
}

impl ItemBody {
    /// The kind tag persisted alongside this body.
    pub const fn kind(self) -> ItemKind {
        match self {
            Self::Blood(_) => ItemKind::Blood,
            Self::SpeedProbe(_) => ItemKind::SpeedProbe,
            Self::DropBlocker(_) => ItemKind::DropBlocker,
            Self::ResurrectionGate(_) => ItemKind::ResurrectionGate,
            Self::Keepsake(_) => ItemKind::Keepsake,
            Self::StackableResource(_) => ItemKind::StackableResource,
        }
    }

    /// Encode the class record at the class's current version.
    pub fn encode_class(self) -> VersionedRecord {
        match self {
            Self::Blood(body) => encode(&body),
            Self::SpeedProbe(body) => encode(&body),
            Self::DropBlocker(body) => encode(&body),
            Self::ResurrectionGate(body) => encode(&body),
            Self::Keepsake(body) => encode(&body),
            Self::StackableResource(body) => encode(&body),
        }
    }

    /// Decode a class record for `kind`.
    ///
    /// # Errors
    ///
    /// Returns the [`PersistError`] raised by the class's decoder.
    pub fn decode_class(kind: ItemKind, record: &VersionedRecord) -> Result<Self, PersistError> {
        Ok(match kind {
            ItemKind::Blood => Self::Blood(decode(record)?),
            ItemKind::SpeedProbe => Self::SpeedProbe(decode(record)?),
            ItemKind::DropBlocker => Self::DropBlocker(decode(record)?),
            ItemKind::ResurrectionGate => Self::ResurrectionGate(decode(record)?),
            ItemKind::Keepsake => Self::Keepsake(decode(record)?),
            ItemKind::StackableResource => Self::StackableResource(decode(record)?),
        })
    }
}

/// An item placed in the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    /// Shared appearance and placement.
    pub base: ItemBase,
    /// Class-specific state.
    pub body: ItemBody,
    timer: Option<TimerHandle>,
}

impl Item {
    pub(crate) const fn new(id: ItemId, base: ItemBase, body: ItemBody) -> Self {
        Self {
            id,
            base,
            body,
            timer: None,
        }
    }

    /// Item identity.
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Item kind.
    pub const fn kind(&self) -> ItemKind {
        self.body.kind()
    }

    /// Handle of the item's pending delayed action, if any.
    pub const fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub(crate) const fn replace_timer(&mut self, handle: TimerHandle) -> Option<TimerHandle> {
        self.timer.replace(handle)
    }

    pub(crate) const fn take_timer(&mut self) -> Option<TimerHandle> {
        self.timer.take()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shardkeep_types::{Point3D, ResourceKind};

    use super::*;

    #[test]
    fn class_record_matches_kind() {
        let body = ItemBody::StackableResource(StackableResource::new(ResourceKind::Log));
        let record = body.encode_class();
        assert_eq!(ItemBody::decode_class(body.kind(), &record).unwrap(), body);
    }

    #[test]
    fn class_record_of_another_kind_is_rejected() {
        let record = ItemBody::Keepsake(Keepsake { consumed: true }).encode_class();
        let err = ItemBody::decode_class(ItemKind::Blood, &record).unwrap_err();
        assert!(matches!(err, PersistError::TrailingFields { remaining: 1, .. }));
    }

    #[test]
    fn item_reports_kind_and_id() {
        let id = ItemId::new();
        let item = Item::new(id, SpeedProbe::base(Point3D::default()), ItemBody::SpeedProbe(SpeedProbe));
        assert_eq!(item.id(), id);
        assert_eq!(item.kind(), ItemKind::SpeedProbe);
        assert_eq!(item.timer(), None);
    }
}
