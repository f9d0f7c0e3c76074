//! Core [`Component`] trait and associated identifiers.
//!
//! Every piece of data stored in the ECS implements [`Component`]. The trait
//! requires `Send + Sync + 'static` so a world full of components can be moved
//! to another thread.
//!
//! A component kind has two identities:
//!
//! - [`KindIndex`]: a small dense number assigned on first use within this
//!   process. Stores are addressed by it.
//! - [`ComponentTypeId`]: an FNV-1a hash of the kind's name. Stable across
//!   processes and builds, so it tags data that leaves the process.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::kind::KindIndex;

/// Name-derived kind id (FNV-1a, 64-bit). Two builds that agree on a kind's
/// name agree on its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;

    /// Hash a kind name. Usable in `const` context.
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// The id of component kind `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self::from_name(T::type_name())
    }
}

/// The core component trait.
///
/// Components are plain data records; behavior lives in the systems that
/// iterate them. Kinds that should be readable through the get-or-create
/// accessor also implement [`Default`].
///
/// # Examples
///
/// ```rust
/// use engine_component::Component;
///
/// #[derive(Debug, Default, Clone, Copy)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Send + Sync + 'static {
    /// A human-readable name for this component kind.
    fn type_name() -> &'static str;

    /// Returns the name-derived [`ComponentTypeId`] for this kind.
    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::from_name(Self::type_name())
    }

    /// Returns the in-process [`KindIndex`] for this kind.
    fn kind_index() -> KindIndex {
        KindIndex::of::<Self>()
    }
}

/// A record pairing an [`Entity`] with one serialised component value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// The entity this component belongs to.
    pub entity: Entity,
    /// MessagePack-encoded component bytes.
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq)]
    struct Health {
        current: f32,
        max: f32,
    }

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Velocity {
        _x: f32,
        _y: f32,
    }

    impl Component for Velocity {
        fn type_name() -> &'static str {
            "Velocity"
        }
    }

    #[test]
    fn test_component_type_id_is_stable() {
        assert_eq!(Health::component_type_id(), Health::component_type_id());
    }

    #[test]
    fn test_component_type_id_matches_from_name() {
        assert_eq!(
            Health::component_type_id(),
            ComponentTypeId::from_name("Health")
        );
        assert_eq!(ComponentTypeId::of::<Health>(), Health::component_type_id());
    }

    #[test]
    fn test_component_type_id_differs_between_types() {
        assert_ne!(Health::component_type_id(), Velocity::component_type_id());
    }

    #[test]
    fn test_fnv1a_known_vector() {
        // FNV-1a 64-bit of the empty string is the offset basis itself.
        assert_eq!(
            ComponentTypeId::from_name(""),
            ComponentTypeId(0xcbf2_9ce4_8422_2325)
        );
        // FNV-1a 64-bit of "a".
        assert_eq!(
            ComponentTypeId::from_name("a"),
            ComponentTypeId(0xaf63_dc4c_8601_ec8c)
        );
    }

    #[test]
    fn test_kind_index_differs_between_types() {
        assert_ne!(Health::kind_index(), Velocity::kind_index());
        assert_eq!(Health::kind_index(), KindIndex::of::<Health>());
    }

    #[test]
    fn test_record_roundtrip_carries_component() {
        let health = Health {
            current: 80.0,
            max: 100.0,
        };
        let record = ComponentRecord {
            entity: Entity::new(4, 1),
            data: rmp_serde::to_vec_named(&health).unwrap(),
        };
        let restored: Health = rmp_serde::from_slice(&record.data).unwrap();
        assert_eq!(health, restored);
    }
}
