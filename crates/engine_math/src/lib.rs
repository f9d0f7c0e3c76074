//! # engine_math
//!
//! 2D math for the engine. Re-exports [`glam`] and defines the spatial
//! components that implement [`Component`](engine_component::Component).

pub mod motion;
pub mod transform;

pub use glam::{Mat3, Vec2};

pub use motion::{Position, Velocity};
pub use transform::Transform2D;
