//! Components owned by the demo app.

use engine_component::Component;
use serde::{Deserialize, Serialize};

/// A textured quad drawn at the entity's position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Texture asset path.
    pub texture: String,
    /// Draw layer; lower layers are drawn first.
    pub layer: i32,
}

impl Sprite {
    pub fn new(texture: impl Into<String>, layer: i32) -> Self {
        Self {
            texture: texture.into(),
            layer,
        }
    }
}

impl Component for Sprite {
    fn type_name() -> &'static str {
        "Sprite"
    }
}

/// Seconds left before the entity is destroyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining: f32,
}

impl Lifetime {
    pub fn seconds(remaining: f32) -> Self {
        Self { remaining }
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

impl Component for Lifetime {
    fn type_name() -> &'static str {
        "Lifetime"
    }
}
