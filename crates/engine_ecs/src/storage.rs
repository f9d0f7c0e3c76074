//! Per-kind sparse-set storage.
//!
//! A [`ComponentStore`] keeps one kind's values packed in a dense array, with
//! a parallel array of owning entities and a sparse array mapping entity slot
//! indices to dense rows. Lookup, insert and remove are O(1); removal
//! swap-removes, so dense order is not insertion order once anything has been
//! removed.
//!
//! [`ErasedStore`] is the narrow interface the registry uses to talk to a store
//! without knowing its kind.

use std::any::Any;

use engine_component::{Component, Entity};

/// Sparse slot marker for "no row".
const EMPTY: u32 = u32::MAX;

/// Storage for every value of one component kind `K`.
///
/// Invariant: for every dense row `i`, `sparse[entities[i].index()] == i`.
#[derive(Debug)]
pub struct ComponentStore<K> {
    sparse: Vec<u32>,
    entities: Vec<Entity>,
    values: Vec<K>,
}

impl<K> Default for ComponentStore<K> {
    fn default() -> Self {
        Self {
            sparse: Vec::new(),
            entities: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<K: Component> ComponentStore<K> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the store holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dense row of `entity`, if it has a value here. Stale handles miss
    /// because the stored entity carries the current generation.
    #[inline]
    fn row(&self, entity: Entity) -> Option<usize> {
        let row = *self.sparse.get(entity.index() as usize)?;
        if row == EMPTY {
            return None;
        }
        let row = row as usize;
        (self.entities[row] == entity).then_some(row)
    }

    /// Returns `true` if `entity` has a value in this store.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.row(entity).is_some()
    }

    /// Returns the value for `entity`.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&K> {
        self.row(entity).map(|row| &self.values[row])
    }

    /// Returns the value for `entity`, mutably.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut K> {
        self.row(entity).map(|row| &mut self.values[row])
    }

    /// Sets the value for `entity`, returning the previous one.
    ///
    /// A row still held by an older generation of the same slot is taken
    /// over in place and its value dropped.
    pub fn insert(&mut self, entity: Entity, value: K) -> Option<K> {
        let slot = entity.index() as usize;
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, EMPTY);
        }

        match self.sparse[slot] {
            EMPTY => {
                self.sparse[slot] = self.values.len() as u32;
                self.entities.push(entity);
                self.values.push(value);
                None
            }
            row => {
                let row = row as usize;
                if self.entities[row] == entity {
                    Some(std::mem::replace(&mut self.values[row], value))
                } else {
                    self.entities[row] = entity;
                    self.values[row] = value;
                    None
                }
            }
        }
    }

    /// Returns the value for `entity`, inserting `make()` first if absent.
    pub fn get_or_insert_with(&mut self, entity: Entity, make: impl FnOnce() -> K) -> &mut K {
        let row = match self.row(entity) {
            Some(row) => row,
            None => {
                self.insert(entity, make());
                self.sparse[entity.index() as usize] as usize
            }
        };
        &mut self.values[row]
    }

    /// Removes and returns the value for `entity`.
    pub fn remove(&mut self, entity: Entity) -> Option<K> {
        let row = self.row(entity)?;
        self.sparse[entity.index() as usize] = EMPTY;

        let last = self.values.len() - 1;
        self.entities.swap_remove(row);
        let value = self.values.swap_remove(row);
        if row != last {
            let moved = self.entities[row];
            self.sparse[moved.index() as usize] = row as u32;
        }
        Some(value)
    }

    /// Entities with a value here, in dense order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Values in dense order, parallel to [`entities`](Self::entities).
    #[must_use]
    pub fn values(&self) -> &[K] {
        &self.values
    }

    /// Values in dense order, mutably.
    pub fn values_mut(&mut self) -> &mut [K] {
        &mut self.values
    }

    /// Iterates `(entity, value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &K)> {
        self.entities.iter().copied().zip(self.values.iter())
    }

    /// Iterates `(entity, value)` pairs in dense order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut K)> {
        self.entities.iter().copied().zip(self.values.iter_mut())
    }

    /// Drops every value. Keeps the allocations.
    pub fn clear(&mut self) {
        self.sparse.clear();
        self.entities.clear();
        self.values.clear();
    }
}

/// Kind-agnostic view of a [`ComponentStore`].
///
/// The registry owns stores as `Box<dyn ErasedStore>` and recovers the
/// concrete type through [`as_any`](ErasedStore::as_any).
pub trait ErasedStore: Any + Send + Sync {
    /// Name of the stored kind.
    fn type_name(&self) -> &'static str;

    /// Returns `true` if `entity` has a value here.
    fn contains(&self, entity: Entity) -> bool;

    /// Drops the value for `entity`. Returns `true` if there was one.
    fn remove_entity(&mut self, entity: Entity) -> bool;

    /// Number of stored values.
    fn len(&self) -> usize;

    /// Returns `true` if the store holds nothing.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entities with a value here, in dense order.
    fn entities(&self) -> &[Entity];

    /// Drops every value.
    fn clear(&mut self);

    /// Upcast for downcasting to the concrete store.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete store.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<K: Component> ErasedStore for ComponentStore<K> {
    fn type_name(&self) -> &'static str {
        K::type_name()
    }

    fn contains(&self, entity: Entity) -> bool {
        ComponentStore::contains(self, entity)
    }

    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn len(&self) -> usize {
        ComponentStore::len(self)
    }

    fn entities(&self) -> &[Entity] {
        ComponentStore::entities(self)
    }

    fn clear(&mut self) {
        ComponentStore::clear(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
