//! Persisted form of an [`Actor`].

use shardkeep_types::{Actor, ActorId, ActorKind};

use crate::codec::Versioned;
use crate::error::PersistError;
use crate::reader::RecordReader;
use crate::writer::RecordWriter;

const PLAYER_CODE: u8 = 0;
const CREATURE_CODE: u8 = 1;

impl Versioned for Actor {
    const SCHEMA: &'static str = "actor";
    const CURRENT_VERSION: u32 = 0;

    fn write_fields(&self, writer: &mut RecordWriter) {
        let kind = match self.kind {
            ActorKind::Player => PLAYER_CODE,
            ActorKind::Creature => CREATURE_CODE,
        };
        writer
            .write_uuid(self.id.into_inner())
            .write_text(self.name.as_str())
            .write_u8(kind)
            .write_bool(self.alive)
            .write_point(self.location)
            .write_opt_duration(self.last_move_mark);
    }

    fn read_fields(_version: u32, reader: &mut RecordReader<'_>) -> Result<Self, PersistError> {
        let id = ActorId::from(reader.read_uuid()?);
        let name = reader.read_text()?;
        let kind = match reader.read_u8()? {
            PLAYER_CODE => ActorKind::Player,
            CREATURE_CODE => ActorKind::Creature,
            other => {
                return Err(PersistError::InvalidValue {
                    field: "actor.kind",
                    reason: format!("unknown actor kind code {other}"),
                });
            }
        };
        Ok(Self {
            id,
            name,
            kind,
            alive: reader.read_bool()?,
            location: reader.read_point()?,
            last_move_mark: reader.read_opt_duration()?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use core::time::Duration;

    use shardkeep_types::Point3D;

    use super::*;
    use crate::codec::{decode, encode};

    #[test]
    fn actor_roundtrip_keeps_probe_mark() {
        let mut actor = Actor::new("Iolo", ActorKind::Player, Point3D::new(5, 5, 0));
        actor.alive = false;
        actor.last_move_mark = Some(Duration::from_millis(1250));

        let restored: Actor = decode(&encode(&actor)).unwrap();
        assert_eq!(restored, actor);
    }

    #[test]
    fn unknown_kind_code_is_invalid() {
        let actor = Actor::new("Mongbat", ActorKind::Creature, Point3D::default());
        let mut record = encode(&actor);
        if let Some(field) = record.fields.get_mut(2) {
            *field = crate::FieldValue::U8(9);
        }
        let err = decode::<Actor>(&record).unwrap_err();
        assert!(matches!(err, PersistError::InvalidValue { field: "actor.kind", .. }));
    }
}
