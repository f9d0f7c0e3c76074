//! 2D transform component.
//!
//! [`Transform2D`] holds translation, rotation and scale in the plane. The
//! render-side collaborator turns it into a model matrix per sprite.

use engine_component::Component;
use glam::{Mat3, Vec2};
use serde::{Deserialize, Serialize};

/// A 2D transform: translation, rotation in radians, and per-axis scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform2D {
    /// World-space translation.
    pub translation: Vec2,
    /// Counter-clockwise rotation in radians.
    pub rotation: f32,
    /// Per-axis scale.
    pub scale: Vec2,
}

impl Transform2D {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    /// Create a transform at `translation` with no rotation and unit scale.
    #[must_use]
    pub fn from_translation(translation: Vec2) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Compute the 3×3 homogeneous model matrix for this transform.
    #[must_use]
    pub fn to_matrix(&self) -> Mat3 {
        Mat3::from_scale_angle_translation(self.scale, self.rotation, self.translation)
    }

    /// Move by `offset`.
    #[must_use]
    pub fn translated(mut self, offset: Vec2) -> Self {
        self.translation += offset;
        self
    }

    /// Rotate by `radians`.
    #[must_use]
    pub fn rotated(mut self, radians: f32) -> Self {
        self.rotation += radians;
        self
    }

    /// Multiply the scale by a uniform factor.
    #[must_use]
    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale *= factor;
        self
    }

    /// Map a point from local space into world space.
    #[must_use]
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.to_matrix().transform_point2(point)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform2D {
    fn type_name() -> &'static str {
        "Transform2D"
    }
}
