//! Entity-scoped access to a world.

use engine_component::{Component, Entity};

use crate::world::World;

/// A live entity together with mutable access to its world.
///
/// Lets callers write `world.spawn().insert(a).insert(b)` or
/// `handle.get::<Health>().current -= 1` without repeating the entity.
#[derive(Debug)]
pub struct EntityMut<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl<'w> EntityMut<'w> {
    pub(crate) fn new(world: &'w mut World, entity: Entity) -> Self {
        Self { world, entity }
    }

    /// The entity this handle points at.
    #[must_use]
    pub fn id(&self) -> Entity {
        self.entity
    }

    /// Get-or-create access to the entity's `K`.
    pub fn get<K: Component + Default>(&mut self) -> &mut K {
        self.world.get::<K>(self.entity)
    }

    /// The entity's `K`, if it has one.
    #[must_use]
    pub fn get_ref<K: Component>(&self) -> Option<&K> {
        self.world.get_ref::<K>(self.entity)
    }

    /// Set the entity's `K`.
    pub fn insert<K: Component>(&mut self, value: K) -> &mut Self {
        self.world.insert(self.entity, value);
        self
    }

    /// Returns `true` if the entity has a `K`.
    #[must_use]
    pub fn has<K: Component>(&self) -> bool {
        self.world.has::<K>(self.entity)
    }

    /// Remove and return the entity's `K`.
    pub fn remove<K: Component>(&mut self) -> Option<K> {
        self.world.remove::<K>(self.entity)
    }

    /// Destroy the entity.
    pub fn destroy(self) {
        self.world.destroy(self.entity);
    }
}
