//! Entity handles and slot allocation.
//!
//! An [`Entity`] is a lightweight `u64` handle with no inherent data. The low
//! 32 bits name a slot, the high 32 bits carry the generation the slot had
//! when the handle was issued. Destroyed slots are recycled and every recycle
//! bumps the generation, so a handle kept past its entity's destruction never
//! matches the slot's next occupant.

use serde::{Deserialize, Serialize};

/// A generation-counted entity handle.
///
/// Entities are pure identifiers: they carry no data of their own. Components
/// are attached to entities to give them meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(u64);

impl Entity {
    /// The null / invalid entity sentinel. Never returned by an allocator.
    pub const INVALID: Entity = Entity(u64::MAX);

    /// Build a handle from a slot index and a generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | index as u64)
    }

    /// Rebuild a handle from its packed `u64` form.
    #[must_use]
    pub const fn from_raw(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the packed `u64` form of this handle.
    #[must_use]
    pub const fn to_raw(self) -> u64 {
        self.0
    }

    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the slot generation this handle was issued with.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns `true` unless this is [`Entity::INVALID`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u64::MAX
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::INVALID
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({}v{})", self.index(), self.generation())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    generation: u32,
    alive: bool,
}

/// Hands out entity handles and recycles the slots of destroyed entities.
///
/// Freed slots go on a LIFO free list. The slot's generation is bumped when
/// it is freed, which invalidates every outstanding handle to it. After
/// 2^32 recycles of one slot the generation wraps and a very old handle could
/// match again.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    slots: Vec<Slot>,
    free: Vec<u32>,
    alive: usize,
}

impl EntityAllocator {
    /// Creates an empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator with room for `capacity` slots before it
    /// reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            alive: 0,
        }
    }

    /// Allocates a handle, reusing a freed slot when one is available.
    ///
    /// # Panics
    ///
    /// Panics if all `u32::MAX` slots are alive at once.
    pub fn allocate(&mut self) -> Entity {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = u32::try_from(self.slots.len())
                    .ok()
                    .filter(|&i| i != u32::MAX)
                    .expect("entity slot space exhausted");
                self.slots.push(Slot::default());
                index
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.alive = true;
        self.alive += 1;
        Entity::new(index, slot.generation)
    }

    /// Frees the slot behind `entity`.
    ///
    /// Returns `false` without touching anything if the handle is stale,
    /// invalid or already freed.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let slot = &mut self.slots[entity.index() as usize];
        slot.alive = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(entity.index());
        self.alive -= 1;
        true
    }

    /// Frees every alive slot.
    pub fn free_all(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.alive {
                slot.alive = false;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.alive = 0;
    }

    /// Returns `true` if `entity` names a live slot at its current generation.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        entity.is_valid()
            && self
                .slots
                .get(entity.index() as usize)
                .is_some_and(|slot| {
                    slot.alive && slot.generation == entity.generation()
                })
    }

    /// Returns the number of alive entities.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive
    }

    /// Returns the number of slots ever handed out (alive or free).
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over the handles of all alive entities in slot order.
    pub fn iter_alive(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(index, slot)| Entity::new(index as u32, slot.generation))
    }
}
