//! Query descriptors for conjunctive component queries.
//!
//! A [`QueryDescriptor`] lists the component kinds an entity must carry to be
//! matched, in the order the caller declared them. The first kind is the
//! default iteration basis, so callers should list the rarest kind first.

use crate::component::Component;
use crate::kind::KindIndex;

/// The kinds a query requires, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDescriptor {
    kinds: Vec<KindIndex>,
    names: Vec<&'static str>,
}

impl QueryDescriptor {
    /// Create a new empty query descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require component kind `K`.
    #[must_use]
    pub fn with<K: Component>(mut self) -> Self {
        self.kinds.push(K::kind_index());
        self.names.push(K::type_name());
        self
    }

    /// The required kinds, in declaration order.
    #[must_use]
    pub fn kinds(&self) -> &[KindIndex] {
        &self.kinds
    }

    /// The required kinds' names, parallel to [`kinds`](Self::kinds).
    #[must_use]
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// The first declared kind.
    #[must_use]
    pub fn first(&self) -> Option<KindIndex> {
        self.kinds.first().copied()
    }

    /// Returns the number of required kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if no kind is required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl std::fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Transform;
    struct Velocity;

    impl Component for Transform {
        fn type_name() -> &'static str {
            "Transform"
        }
    }

    impl Component for Velocity {
        fn type_name() -> &'static str {
            "Velocity"
        }
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let q = QueryDescriptor::new()
            .with::<Velocity>()
            .with::<Transform>();
        assert_eq!(
            q.kinds(),
            &[Velocity::kind_index(), Transform::kind_index()]
        );
        assert_eq!(q.first(), Some(Velocity::kind_index()));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_empty_descriptor() {
        let q = QueryDescriptor::new();
        assert!(q.is_empty());
        assert_eq!(q.first(), None);
    }

    #[test]
    fn test_display_lists_names() {
        let q = QueryDescriptor::new()
            .with::<Transform>()
            .with::<Velocity>();
        assert_eq!(q.to_string(), "(Transform, Velocity)");
    }
}
