//! # engine_ecs
//!
//! The entity-component store of the 2D engine.
//!
//! Each component kind lives in its own sparse-set [`ComponentStore`]. A
//! [`StoreRegistry`] owns the stores behind a type-erased [`ErasedStore`]
//! interface, and the [`World`] ties the registry to a generational entity
//! allocator.
//!
//! ```rust
//! use engine_component::Component;
//! use engine_ecs::World;
//!
//! #[derive(Debug, Default)]
//! struct Position { x: f32, y: f32 }
//! #[derive(Debug, Default)]
//! struct Velocity { x: f32, y: f32 }
//!
//! impl Component for Position {
//!     fn type_name() -> &'static str { "Position" }
//! }
//! impl Component for Velocity {
//!     fn type_name() -> &'static str { "Velocity" }
//! }
//!
//! let mut world = World::new();
//! let e = world.create();
//! world.get::<Velocity>(e).x = 1.0;
//! world.get::<Position>(e);
//!
//! world.for_each::<(Velocity, Position), _>(|world, entity| {
//!     let dx = world.get::<Velocity>(entity).x;
//!     world.get::<Position>(entity).x += dx;
//! });
//! assert_eq!(world.get_ref::<Position>(e).map(|p| p.x), Some(1.0));
//! ```

pub mod config;
pub mod error;
pub mod handle;
pub mod query;
pub mod registry;
pub mod snapshot;
pub mod storage;
pub mod world;

pub use config::{DestroyPolicy, QueryOrder, WorldConfig};
pub use error::EcsError;
pub use handle::EntityMut;
pub use query::Query;
pub use registry::StoreRegistry;
pub use snapshot::KindSnapshot;
pub use storage::{ComponentStore, ErasedStore};
pub use world::World;

pub use engine_component::{Component, Entity};
