//! World configuration.

use serde::{Deserialize, Serialize};

use crate::error::EcsError;

/// What [`World::destroy`](crate::World::destroy) does with a handle that is
/// no longer alive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestroyPolicy {
    /// Quietly ignore it.
    #[default]
    Lenient,
    /// Ignore it, but log a warning naming the handle.
    Strict,
}

/// Which store a conjunctive query walks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOrder {
    /// The store of the first kind listed in the query.
    #[default]
    Declared,
    /// Whichever queried store is currently smallest.
    SmallestFirst,
}

/// Configuration for a [`World`](crate::World).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Entity slots to reserve up front.
    pub initial_capacity: usize,
    /// Handling of dead handles passed to `destroy`.
    pub destroy_policy: DestroyPolicy,
    /// Basis store selection for queries.
    pub query_order: QueryOrder,
}

impl WorldConfig {
    /// Create a config with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `capacity` entity slots up front.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the destroy policy.
    #[must_use]
    pub fn with_destroy_policy(mut self, policy: DestroyPolicy) -> Self {
        self.destroy_policy = policy;
        self
    }

    /// Set the query basis selection.
    #[must_use]
    pub fn with_query_order(mut self, order: QueryOrder) -> Self {
        self.query_order = order;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Config`] if the document is not valid JSON or a
    /// field has the wrong shape.
    pub fn from_json(json: &str) -> Result<Self, EcsError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorldConfig::new();
        assert_eq!(config.initial_capacity, 0);
        assert_eq!(config.destroy_policy, DestroyPolicy::Lenient);
        assert_eq!(config.query_order, QueryOrder::Declared);
    }

    #[test]
    fn test_builder() {
        let config = WorldConfig::new()
            .with_initial_capacity(128)
            .with_destroy_policy(DestroyPolicy::Strict)
            .with_query_order(QueryOrder::SmallestFirst);
        assert_eq!(config.initial_capacity, 128);
        assert_eq!(config.destroy_policy, DestroyPolicy::Strict);
        assert_eq!(config.query_order, QueryOrder::SmallestFirst);
    }

    #[test]
    fn test_from_json_partial() {
        let config = WorldConfig::from_json(r#"{ "query_order": "smallest_first" }"#).unwrap();
        assert_eq!(config.query_order, QueryOrder::SmallestFirst);
        assert_eq!(config.destroy_policy, DestroyPolicy::Lenient);
    }

    #[test]
    fn test_from_json_empty_object() {
        let config = WorldConfig::from_json("{}").unwrap();
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_variant() {
        let result = WorldConfig::from_json(r#"{ "destroy_policy": "explode" }"#);
        assert!(matches!(result, Err(EcsError::Config(_))));
    }
}
