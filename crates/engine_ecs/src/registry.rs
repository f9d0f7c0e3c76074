//! The store registry: one type-erased store per component kind.
//!
//! Stores live in a vector indexed by [`KindIndex`] and are created lazily the
//! first time a kind is written. The registry is the only owner of its stores
//! and is deliberately not `Clone`.

use engine_component::{Component, Entity, KindIndex};
use tracing::debug;

use crate::storage::{ComponentStore, ErasedStore};

/// Owns every component store of a world.
#[derive(Default)]
pub struct StoreRegistry {
    stores: Vec<Option<Box<dyn ErasedStore>>>,
}

impl StoreRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the type-erased store at `kind`, if it has been created.
    #[must_use]
    pub fn erased(&self, kind: KindIndex) -> Option<&dyn ErasedStore> {
        self.stores.get(kind.index())?.as_deref()
    }

    /// Returns the store for `K`, if it has been created.
    #[must_use]
    pub fn get<K: Component>(&self) -> Option<&ComponentStore<K>> {
        self.erased(K::kind_index())?
            .as_any()
            .downcast_ref::<ComponentStore<K>>()
    }

    /// Returns the store for `K` mutably, if it has been created.
    pub fn get_mut<K: Component>(&mut self) -> Option<&mut ComponentStore<K>> {
        self.stores
            .get_mut(K::kind_index().index())?
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut::<ComponentStore<K>>()
    }

    /// Returns the store for `K`, creating it on first use.
    pub fn get_or_create<K: Component>(&mut self) -> &mut ComponentStore<K> {
        let slot = K::kind_index().index();
        if slot >= self.stores.len() {
            self.stores.resize_with(slot + 1, || None);
        }

        self.stores[slot]
            .get_or_insert_with(|| -> Box<dyn ErasedStore> {
                debug!(kind = K::type_name(), slot, "created component store");
                Box::new(ComponentStore::<K>::new())
            })
            .as_any_mut()
            .downcast_mut::<ComponentStore<K>>()
            .expect("kind index resolved to a store of another kind")
    }

    /// Removes `entity` from every store. Returns how many stores held it.
    pub fn remove_entity(&mut self, entity: Entity) -> usize {
        self.stores
            .iter_mut()
            .flatten()
            .map(|store| store.remove_entity(entity))
            .filter(|&removed| removed)
            .count()
    }

    /// Iterates over every created store.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ErasedStore> {
        self.stores.iter().filter_map(|store| store.as_deref())
    }

    /// Number of created stores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if no store has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Empties every store. The stores themselves stay registered.
    pub fn clear(&mut self) {
        for store in self.stores.iter_mut().flatten() {
            store.clear();
        }
    }
}

impl std::fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|store| (store.type_name(), store.len())))
            .finish()
    }
}
