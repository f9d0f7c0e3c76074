//! Per-kind snapshots.
//!
//! A [`KindSnapshot`] carries every value of one component kind as
//! MessagePack records, tagged with the kind's name-derived
//! [`ComponentTypeId`]. It moves a kind's data between worlds that share
//! entity handles. It does not capture entity allocation state.

use engine_component::{Component, ComponentRecord, ComponentTypeId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EcsError;
use crate::world::World;

/// Every value of one component kind, encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindSnapshot {
    /// Name-derived id of the kind.
    pub type_id: ComponentTypeId,
    /// Name of the kind.
    pub name: String,
    /// One record per entity, in store order.
    pub records: Vec<ComponentRecord>,
}

impl World {
    /// Encode every `K` in this world.
    ///
    /// A kind with no store yields an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Encode`] if a value fails to serialise.
    pub fn export<K>(&self) -> Result<KindSnapshot, EcsError>
    where
        K: Component + Serialize,
    {
        let records = match self.store::<K>() {
            Some(store) => store
                .iter()
                .map(|(entity, value)| -> Result<ComponentRecord, EcsError> {
                    Ok(ComponentRecord {
                        entity,
                        data: rmp_serde::to_vec_named(value)?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(KindSnapshot {
            type_id: K::component_type_id(),
            name: K::type_name().to_string(),
            records,
        })
    }

    /// Decode a snapshot of `K` into this world, overwriting existing values.
    ///
    /// Records for entities that are not alive here are skipped. Every record
    /// is decoded before anything is written, so a bad record leaves the world
    /// untouched. Returns the number of values written.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::KindMismatch`] if the snapshot is for another kind,
    /// or [`EcsError::Decode`] if a record fails to deserialise.
    pub fn import<K>(&mut self, snapshot: &KindSnapshot) -> Result<usize, EcsError>
    where
        K: Component + DeserializeOwned,
    {
        if snapshot.type_id != K::component_type_id() {
            return Err(EcsError::KindMismatch {
                expected: K::type_name(),
                found: snapshot.name.clone(),
            });
        }

        let mut decoded = Vec::with_capacity(snapshot.records.len());
        for record in &snapshot.records {
            if !self.is_alive(record.entity) {
                debug!(
                    entity = %record.entity,
                    kind = K::type_name(),
                    "skipping record for dead entity"
                );
                continue;
            }
            let value = rmp_serde::from_slice::<K>(&record.data)?;
            decoded.push((record.entity, value));
        }

        let written = decoded.len();
        let store = self.stores_mut().get_or_create::<K>();
        for (entity, value) in decoded {
            store.insert(entity, value);
        }
        debug!(kind = K::type_name(), written, "imported kind snapshot");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Sprite {
        texture: String,
        layer: i32,
    }

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Score(u32);

    impl Component for Sprite {
        fn type_name() -> &'static str {
            "Sprite"
        }
    }

    impl Component for Score {
        fn type_name() -> &'static str {
            "Score"
        }
    }

    fn sprite(texture: &str, layer: i32) -> Sprite {
        Sprite {
            texture: texture.to_string(),
            layer,
        }
    }

    #[test]
    fn test_export_import_between_worlds() {
        let mut source = World::new();
        let mut target = World::new();
        let a = source.create();
        let b = source.create();
        assert_eq!(target.create(), a);
        assert_eq!(target.create(), b);

        source.insert(a, sprite("ship.png", 1));
        source.insert(b, sprite("rock.png", 0));

        let snapshot = source.export::<Sprite>().unwrap();
        assert_eq!(snapshot.name, "Sprite");
        assert_eq!(snapshot.records.len(), 2);

        assert_eq!(target.import::<Sprite>(&snapshot).unwrap(), 2);
        assert_eq!(target.get_ref::<Sprite>(a), Some(&sprite("ship.png", 1)));
        assert_eq!(target.get_ref::<Sprite>(b), Some(&sprite("rock.png", 0)));
    }

    #[test]
    fn test_export_unseen_kind_is_empty() {
        let world = World::new();
        let snapshot = world.export::<Score>().unwrap();
        assert!(snapshot.records.is_empty());
        assert_eq!(snapshot.type_id, Score::component_type_id());
    }

    #[test]
    fn test_import_rejects_other_kind() {
        let mut world = World::new();
        let e = world.create();
        world.insert(e, Score(5));
        let snapshot = world.export::<Score>().unwrap();

        let result = world.import::<Sprite>(&snapshot);
        assert!(matches!(
            result,
            Err(EcsError::KindMismatch { expected: "Sprite", ref found }) if found == "Score"
        ));
    }

    #[test]
    fn test_import_skips_dead_entities() {
        let mut world = World::new();
        let keep = world.create();
        let gone = world.create();
        world.insert(keep, Score(1));
        world.insert(gone, Score(2));
        let snapshot = world.export::<Score>().unwrap();

        world.destroy(gone);
        world.insert(keep, Score(0));
        assert_eq!(world.import::<Score>(&snapshot).unwrap(), 1);
        assert_eq!(world.get_ref::<Score>(keep), Some(&Score(1)));
        assert!(!world.has::<Score>(gone));
    }

    #[test]
    fn test_bad_record_leaves_world_untouched() {
        let mut world = World::new();
        let a = world.create();
        let b = world.create();
        world.insert(a, Score(1));
        world.insert(b, Score(2));

        let mut snapshot = world.export::<Score>().unwrap();
        for record in &mut snapshot.records {
            if record.entity == b {
                record.data = vec![0xc1];
            } else {
                record.data = rmp_serde::to_vec_named(&Score(10)).unwrap();
            }
        }

        assert!(matches!(
            world.import::<Score>(&snapshot),
            Err(EcsError::Decode(_))
        ));
        assert_eq!(world.get_ref::<Score>(a), Some(&Score(1)));
    }

    #[test]
    fn test_snapshot_itself_serialises() {
        let mut world = World::new();
        let e = world.create();
        world.insert(e, Score(3));
        let snapshot = world.export::<Score>().unwrap();

        let bytes = rmp_serde::to_vec_named(&snapshot).unwrap();
        let restored: KindSnapshot = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(restored, snapshot);
    }
}
