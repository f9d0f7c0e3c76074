//! Systems run by the tick loop.
//!
//! Each system is a plain function over the world. They use the two iteration
//! styles the world offers: `for_each` when the body mutates the world, and
//! `query` for read-only passes.

use engine_ecs::{Entity, World};
use engine_math::{Position, Velocity};
use tracing::trace;

use crate::components::{Lifetime, Sprite};

/// Integrate every position by its velocity over `dt` seconds.
pub fn movement(world: &mut World, dt: f32) {
    world.for_each::<(Position, Velocity), _>(|world, entity| {
        let step = world.get::<Velocity>(entity).step(dt);
        world.get::<Position>(entity).0 += step;
    });
}

/// Count down every lifetime and destroy the entities that expire.
///
/// Returns the number of entities destroyed.
pub fn lifetime(world: &mut World, dt: f32) -> usize {
    let mut expired = 0;
    world.for_each::<(Lifetime,), _>(|world, entity| {
        let left = world.get::<Lifetime>(entity);
        left.remaining -= dt;
        if left.is_expired() {
            trace!(%entity, "lifetime expired");
            world.destroy(entity);
            expired += 1;
        }
    });
    expired
}

/// One sprite to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub entity: Entity,
    pub texture: String,
    pub layer: i32,
    pub position: Position,
}

/// Collect a draw command for every entity with a sprite and a position.
///
/// Commands are sorted by layer. Within a layer they keep store order.
#[must_use]
pub fn build_draw_list(world: &World) -> Vec<DrawCommand> {
    let mut commands: Vec<DrawCommand> = world
        .query::<(Sprite, Position)>()
        .map(|(entity, (sprite, position))| DrawCommand {
            entity,
            texture: sprite.texture.clone(),
            layer: sprite.layer,
            position: *position,
        })
        .collect();
    commands.sort_by_key(|command| command.layer);
    commands
}
