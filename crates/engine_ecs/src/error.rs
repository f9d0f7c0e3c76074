//! ECS error types.

use engine_component::Entity;

/// Errors returned by the non-panicking world API.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// The handle is stale, invalid, or was never issued by this world.
    #[error("entity {0} is not alive")]
    EntityNotFound(Entity),

    /// A snapshot was imported as the wrong component kind.
    #[error("snapshot holds '{found}' records, expected '{expected}'")]
    KindMismatch {
        /// The kind the caller imported as.
        expected: &'static str,
        /// The kind named in the snapshot.
        found: String,
    },

    /// Failed to encode a component to MessagePack.
    #[error("failed to encode component: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Failed to decode a component from MessagePack.
    #[error("failed to decode component: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// A world configuration document could not be parsed.
    #[error("invalid world config: {0}")]
    Config(#[from] serde_json::Error),
}
