//! Process-wide kind indices.
//!
//! Every component type gets a small dense [`KindIndex`] the first time it is
//! asked for one. The assignment is memoized per [`TypeId`], so a kind keeps
//! its index for the life of the process and two kinds never share one. No
//! registration step is needed.

use std::any::TypeId;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;

static NEXT_KIND: AtomicU32 = AtomicU32::new(0);
static KINDS: OnceLock<DashMap<TypeId, KindIndex>> = OnceLock::new();

/// Dense per-type index used to address a kind's store in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindIndex(u32);

impl KindIndex {
    /// Returns the index of `T`, assigning the next free one on first use.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        let kinds = KINDS.get_or_init(DashMap::new);
        let type_id = TypeId::of::<T>();
        if let Some(kind) = kinds.get(&type_id) {
            return *kind;
        }
        // The entry lock makes the counter bump happen once per type even when
        // two threads race on the first lookup.
        *kinds
            .entry(type_id)
            .or_insert_with(|| KindIndex(NEXT_KIND.fetch_add(1, Ordering::Relaxed)))
    }

    /// Returns the index as a `usize`, ready for slicing.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns how many kinds have been assigned an index so far.
    #[must_use]
    pub fn assigned() -> usize {
        NEXT_KIND.load(Ordering::Relaxed) as usize
    }
}

impl std::fmt::Display for KindIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "kind#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    struct Beta;
    struct Gamma;

    #[test]
    fn test_same_type_same_index() {
        assert_eq!(KindIndex::of::<Alpha>(), KindIndex::of::<Alpha>());
    }

    #[test]
    fn test_distinct_types_distinct_indices() {
        let a = KindIndex::of::<Alpha>();
        let b = KindIndex::of::<Beta>();
        let g = KindIndex::of::<Gamma>();
        assert_ne!(a, b);
        assert_ne!(b, g);
        assert_ne!(a, g);
    }

    #[test]
    fn test_unsized_types_get_indices() {
        let slice = KindIndex::of::<str>();
        let owned = KindIndex::of::<String>();
        let object = KindIndex::of::<dyn std::any::Any>();
        assert_ne!(slice, owned);
        assert_ne!(slice, object);
        assert_eq!(KindIndex::of::<str>(), slice);
    }

    #[test]
    fn test_indices_are_dense() {
        let g = KindIndex::of::<Gamma>();
        assert!(g.index() < KindIndex::assigned());
    }

    #[test]
    fn test_concurrent_first_use_agrees() {
        struct Racy;
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(KindIndex::of::<Racy>))
            .collect();
        let seen: Vec<KindIndex> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(seen.windows(2).all(|w| w[0] == w[1]));
    }
}
