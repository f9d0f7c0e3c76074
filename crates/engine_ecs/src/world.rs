//! The ECS world: entity lifetimes plus the store registry.
//!
//! Components are Rust types. Each kind gets its own sparse-set store, created
//! the first time the kind is written, and addressed by the kind's
//! [`KindIndex`](engine_component::KindIndex).

use engine_component::{Component, Entity, EntityAllocator, QueryDescriptor};
use tracing::{debug, trace, warn};

use crate::config::{DestroyPolicy, QueryOrder, WorldConfig};
use crate::error::EcsError;
use crate::handle::EntityMut;
use crate::query::Query;
use crate::registry::StoreRegistry;
use crate::storage::ComponentStore;

/// Owns every entity and every component of one game world.
///
/// Single-threaded: every call runs to completion on the caller's thread.
/// The world is `Send`, so it can be handed to another thread as a whole.
#[derive(Debug, Default)]
pub struct World {
    entities: EntityAllocator,
    stores: StoreRegistry,
    config: WorldConfig,
}

impl World {
    /// Create an empty world with the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty world with the given config.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            entities: EntityAllocator::with_capacity(config.initial_capacity),
            stores: StoreRegistry::new(),
            config,
        }
    }

    /// The config this world was built with.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // -- Entity lifecycle --

    /// Allocate a fresh entity. No store is touched.
    pub fn create(&mut self) -> Entity {
        let entity = self.entities.allocate();
        trace!(%entity, "created entity");
        entity
    }

    /// Allocate a fresh entity and return a handle for attaching components.
    pub fn spawn(&mut self) -> EntityMut<'_> {
        let entity = self.create();
        EntityMut::new(self, entity)
    }

    /// Destroy an entity, removing it from every store.
    ///
    /// Returns `false` if the handle was already dead; that is not an error.
    /// Under [`DestroyPolicy::Strict`] the dead handle is logged at `warn`.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if !self.entities.free(entity) {
            if self.config.destroy_policy == DestroyPolicy::Strict {
                warn!(%entity, "destroy called on an entity that is not alive");
            }
            return false;
        }
        let stores = self.stores.remove_entity(entity);
        debug!(%entity, stores, "destroyed entity");
        true
    }

    /// Destroy an entity, reporting a dead handle as an error.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::EntityNotFound`] if `entity` is not alive.
    pub fn try_destroy(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;
        self.destroy(entity);
        Ok(())
    }

    /// Returns `true` if `entity` is alive in this world.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Number of alive entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.alive_count()
    }

    /// Number of component stores created so far.
    #[must_use]
    pub fn kind_count(&self) -> usize {
        self.stores.len()
    }

    /// Iterates over every alive entity.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter_alive()
    }

    /// Returns a handle bundling this world with `entity`, if it is alive.
    pub fn entity_mut(&mut self, entity: Entity) -> Option<EntityMut<'_>> {
        if !self.is_alive(entity) {
            return None;
        }
        Some(EntityMut::new(self, entity))
    }

    /// Destroy every entity. Stores stay registered but empty.
    pub fn clear(&mut self) {
        let count = self.entities.alive_count();
        self.stores.clear();
        self.entities.free_all();
        debug!(count, "cleared world");
    }

    fn ensure_alive(&self, entity: Entity) -> Result<(), EcsError> {
        if self.is_alive(entity) {
            Ok(())
        } else {
            Err(EcsError::EntityNotFound(entity))
        }
    }

    // -- Component operations --

    /// Returns `entity`'s `K`, default-constructing it first if absent.
    ///
    /// This is a get-or-create accessor: reading a missing component creates
    /// it. Use [`has`](Self::has) or [`get_ref`](Self::get_ref) to look
    /// without creating.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is not alive. [`try_get`](Self::try_get) reports
    /// that as an error instead.
    pub fn get<K: Component + Default>(&mut self, entity: Entity) -> &mut K {
        match self.try_get::<K>(entity) {
            Ok(value) => value,
            Err(err) => panic!("get::<{}>: {err}", K::type_name()),
        }
    }

    /// Get-or-create accessor that reports a dead handle as an error.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::EntityNotFound`] if `entity` is not alive.
    pub fn try_get<K: Component + Default>(&mut self, entity: Entity) -> Result<&mut K, EcsError> {
        self.ensure_alive(entity)?;
        Ok(self
            .stores
            .get_or_create::<K>()
            .get_or_insert_with(entity, K::default))
    }

    /// Returns `entity`'s `K` without creating it.
    #[must_use]
    pub fn get_ref<K: Component>(&self, entity: Entity) -> Option<&K> {
        self.stores.get::<K>()?.get(entity)
    }

    /// Returns `entity`'s `K` mutably without creating it.
    pub fn get_mut<K: Component>(&mut self, entity: Entity) -> Option<&mut K> {
        self.stores.get_mut::<K>()?.get_mut(entity)
    }

    /// Set `entity`'s `K`, returning the value it replaced.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is not alive. [`try_insert`](Self::try_insert)
    /// reports that as an error instead.
    pub fn insert<K: Component>(&mut self, entity: Entity, value: K) -> Option<K> {
        match self.try_insert(entity, value) {
            Ok(previous) => previous,
            Err(err) => panic!("insert::<{}>: {err}", K::type_name()),
        }
    }

    /// Set `entity`'s `K`, reporting a dead handle as an error.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::EntityNotFound`] if `entity` is not alive.
    pub fn try_insert<K: Component>(
        &mut self,
        entity: Entity,
        value: K,
    ) -> Result<Option<K>, EcsError> {
        self.ensure_alive(entity)?;
        Ok(self.stores.get_or_create::<K>().insert(entity, value))
    }

    /// Returns `true` if `entity` currently has a `K`. Never creates one.
    #[must_use]
    pub fn has<K: Component>(&self, entity: Entity) -> bool {
        self.stores
            .get::<K>()
            .is_some_and(|store| store.contains(entity))
    }

    /// Remove `entity`'s `K`, returning it. No-op if absent.
    pub fn remove<K: Component>(&mut self, entity: Entity) -> Option<K> {
        self.stores.get_mut::<K>()?.remove(entity)
    }

    /// Read-only view of the store for `K`, if it has been created.
    #[must_use]
    pub fn store<K: Component>(&self) -> Option<&ComponentStore<K>> {
        self.stores.get::<K>()
    }

    pub(crate) fn stores_mut(&mut self) -> &mut StoreRegistry {
        &mut self.stores
    }

    // -- Query --

    /// Entities of the store a query walks, per the configured
    /// [`QueryOrder`]. `None` when a queried kind has no store yet, which
    /// means nothing can match.
    fn basis(&self, descriptor: &QueryDescriptor) -> Option<&[Entity]> {
        match self.config.query_order {
            QueryOrder::Declared => {
                let first = self.stores.erased(descriptor.first()?)?;
                Some(first.entities())
            }
            QueryOrder::SmallestFirst => descriptor
                .kinds()
                .iter()
                .map(|&kind| self.stores.erased(kind))
                .collect::<Option<Vec<_>>>()?
                .into_iter()
                .min_by_key(|store| store.len())
                .map(|store| store.entities()),
        }
    }

    /// Every entity that currently has all of `Q`'s kinds, in basis order.
    #[must_use]
    pub fn matching<Q: Query>(&self) -> Vec<Entity> {
        let Some(basis) = self.basis(&Q::descriptor()) else {
            return Vec::new();
        };
        basis
            .iter()
            .copied()
            .filter(|&entity| Q::matches(&self.stores, entity))
            .collect()
    }

    /// Call `callback` once for every entity that has all of `Q`'s kinds.
    ///
    /// List the rarest kind first: under [`QueryOrder::Declared`] its store
    /// is the one walked. The matching set is snapshotted before the first
    /// call, and each entity is re-checked right before its call, so the
    /// callback may create, destroy, insert and remove freely:
    ///
    /// - an entity that stops matching before its turn is skipped;
    /// - an entity that starts matching during the walk is not visited;
    /// - no entity is visited twice.
    pub fn for_each<Q, F>(&mut self, mut callback: F)
    where
        Q: Query,
        F: FnMut(&mut World, Entity),
    {
        for entity in self.matching::<Q>() {
            if Q::matches(&self.stores, entity) {
                callback(self, entity);
            }
        }
    }

    /// Borrowing iterator over every entity that has all of `Q`'s kinds,
    /// yielding the entity with references to its queried components.
    pub fn query<Q: Query>(&self) -> impl Iterator<Item = (Entity, Q::Item<'_>)> + '_ {
        let basis = self.basis(&Q::descriptor()).unwrap_or(&[]);
        basis
            .iter()
            .filter_map(move |&entity| {
                Q::fetch(&self.stores, entity).map(|item| (entity, item))
            })
    }
}
