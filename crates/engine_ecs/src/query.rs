//! Tuple queries over component kinds.
//!
//! A [`Query`] is a tuple of one to eight component kinds. An entity matches
//! when it has a value in every listed kind's store. The membership test runs
//! per candidate against the basis store's entities; there is no precomputed
//! intersection.

use engine_component::{Component, Entity, QueryDescriptor};

use crate::registry::StoreRegistry;

/// A conjunctive query: the set of kinds an entity must have.
pub trait Query {
    /// Borrowed view of one matched entity's components.
    type Item<'w>;

    /// The queried kinds in declaration order.
    fn descriptor() -> QueryDescriptor;

    /// Returns `true` if `entity` has every queried kind.
    fn matches(stores: &StoreRegistry, entity: Entity) -> bool;

    /// Borrows every queried component of `entity`, or `None` if one is missing.
    fn fetch(stores: &StoreRegistry, entity: Entity) -> Option<Self::Item<'_>>;
}

macro_rules! impl_query {
    ($($kind:ident),+) => {
        impl<$($kind: Component),+> Query for ($($kind,)+) {
            type Item<'w> = ($(&'w $kind,)+);

            fn descriptor() -> QueryDescriptor {
                QueryDescriptor::new()$(.with::<$kind>())+
            }

            fn matches(stores: &StoreRegistry, entity: Entity) -> bool {
                $(stores.get::<$kind>().is_some_and(|store| store.contains(entity)))&&+
            }

            fn fetch(stores: &StoreRegistry, entity: Entity) -> Option<Self::Item<'_>> {
                Some(($(stores.get::<$kind>()?.get(entity)?,)+))
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);
impl_query!(A, B, C, D, E);
impl_query!(A, B, C, D, E, F);
impl_query!(A, B, C, D, E, F, G);
impl_query!(A, B, C, D, E, F, G, H);
