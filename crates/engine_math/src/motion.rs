//! Point-mass motion components.

use engine_component::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World-space position of an entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position(pub Vec2);

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

/// Linear velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Velocity(pub Vec2);

impl Velocity {
    /// Zero velocity.
    pub const ZERO: Self = Self(Vec2::ZERO);

    /// Create a velocity.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Displacement after `dt` seconds.
    #[must_use]
    pub fn step(self, dt: f32) -> Vec2 {
        self.0 * dt
    }
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_zero() {
        assert_eq!(Position::default(), Position::new(0.0, 0.0));
        assert_eq!(Velocity::default(), Velocity::ZERO);
    }

    #[test]
    fn test_step() {
        assert_eq!(Velocity::new(2.0, -4.0).step(0.5), Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_names_are_distinct() {
        assert_ne!(Position::component_type_id(), Velocity::component_type_id());
    }
}
