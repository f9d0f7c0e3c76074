//! Fixed-timestep tick loop.
//!
//! Each tick runs, in order:
//!
//! 1. `lifetime`: count down and destroy expired entities.
//! 2. `movement`: integrate positions.
//! 3. `build_draw_list`: collect the frame's sprites.
//!
//! By default the loop runs ticks back to back. With `realtime` set it sleeps
//! off whatever is left of each tick's budget (`1 / tick_rate` seconds) and
//! logs a warning when a tick overruns it.

use std::time::{Duration, Instant};

use engine_ecs::World;
use engine_math::{Position, Transform2D, Vec2, Velocity};
use tracing::{debug, info, warn};

use crate::components::{Lifetime, Sprite};
use crate::config::AppConfig;
use crate::systems::{self, DrawCommand};

/// Totals reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickStats {
    pub ticks: u64,
    pub destroyed: usize,
    /// Ticks that took longer than their budget. Only counted in realtime mode.
    pub overruns: u64,
}

/// The tick loop state.
#[derive(Debug)]
pub struct TickLoop {
    tick_id: u64,
    config: AppConfig,
    world: World,
    draw_list: Vec<DrawCommand>,
    stats: TickStats,
}

impl TickLoop {
    /// Create a tick loop over an empty world.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let world = World::with_config(config.world.clone());
        Self {
            tick_id: 0,
            config,
            world,
            draw_list: Vec::new(),
            stats: TickStats::default(),
        }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The draw list built by the last tick.
    #[must_use]
    pub fn draw_list(&self) -> &[DrawCommand] {
        &self.draw_list
    }

    #[must_use]
    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Spawn `spawn_count` entities laid out on a ring.
    ///
    /// Every entity gets a position, a sprite and an outward velocity. Every
    /// third one also gets a lifetime, staggered so they expire over the run.
    pub fn populate(&mut self) {
        let count = self.config.spawn_count;
        let dt = self.config.dt();
        for i in 0..count {
            let angle = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;
            let placement = Transform2D::IDENTITY.rotated(angle);
            let direction = placement.transform_point(Vec2::X);

            let mut entity = self.world.spawn();
            entity
                .insert(Position(direction * 10.0))
                .insert(Velocity(direction))
                .insert(Sprite::new("particle.png", (i % 3) as i32));
            if i % 3 == 0 {
                entity.insert(Lifetime::seconds(dt * (i + 1) as f32));
            }
        }
        info!(count, "spawned entities");
    }

    /// Run one tick.
    pub fn tick(&mut self) {
        self.tick_id += 1;
        let dt = self.config.dt();

        let destroyed = systems::lifetime(&mut self.world, dt);
        systems::movement(&mut self.world, dt);
        self.draw_list = systems::build_draw_list(&self.world);

        self.stats.ticks += 1;
        self.stats.destroyed += destroyed;

        debug!(
            tick_id = self.tick_id,
            destroyed,
            alive = self.world.entity_count(),
            draws = self.draw_list.len(),
            "tick complete"
        );
    }

    /// Run `max_ticks` ticks, paced to `tick_rate` in realtime mode.
    pub fn run(&mut self) {
        let budget = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            realtime = self.config.realtime,
            "starting tick loop"
        );

        let start = Instant::now();
        for _ in 0..self.config.max_ticks {
            let tick_start = Instant::now();
            self.tick();
            if self.config.realtime {
                self.pace(tick_start.elapsed(), budget);
            }
        }

        info!(
            ticks = self.stats.ticks,
            destroyed = self.stats.destroyed,
            alive = self.world.entity_count(),
            kinds = self.world.kind_count(),
            overruns = self.stats.overruns,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "tick loop complete"
        );
    }

    fn pace(&mut self, elapsed: Duration, budget: Duration) {
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
            return;
        }
        self.stats.overruns += 1;
        warn!(
            tick_id = self.tick_id,
            elapsed_ms = elapsed.as_millis() as u64,
            budget_ms = budget.as_millis() as u64,
            "tick exceeded time budget"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(spawn_count: usize, max_ticks: u64) -> AppConfig {
        AppConfig {
            tick_rate: 10.0,
            max_ticks,
            spawn_count,
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_tick_advances_counter() {
        let mut tick_loop = TickLoop::new(config(0, 0));
        assert_eq!(tick_loop.tick_id(), 0);
        tick_loop.tick();
        tick_loop.tick();
        assert_eq!(tick_loop.tick_id(), 2);
    }

    #[test]
    fn test_unpaced_run_does_not_sleep() {
        let mut tick_loop = TickLoop::new(AppConfig {
            tick_rate: 1.0,
            ..config(0, 3)
        });
        let start = Instant::now();
        tick_loop.run();
        assert_eq!(tick_loop.tick_id(), 3);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_realtime_run_sleeps_off_budget() {
        let mut tick_loop = TickLoop::new(AppConfig {
            tick_rate: 200.0,
            realtime: true,
            ..config(0, 4)
        });
        let start = Instant::now();
        tick_loop.run();
        assert_eq!(tick_loop.stats().ticks, 4);
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_overrun_is_counted() {
        let mut tick_loop = TickLoop::new(config(0, 0));
        let budget = Duration::from_millis(5);
        tick_loop.pace(Duration::from_millis(6), budget);
        tick_loop.pace(Duration::ZERO, Duration::from_millis(1));
        assert_eq!(tick_loop.stats().overruns, 1);
    }

    #[test]
    fn test_populate() {
        let mut tick_loop = TickLoop::new(config(9, 0));
        tick_loop.populate();
        let world = tick_loop.world();
        assert_eq!(world.entity_count(), 9);
        assert_eq!(world.store::<Lifetime>().map(|s| s.len()), Some(3));
        assert_eq!(world.matching::<(Position, Velocity, Sprite)>().len(), 9);
    }

    #[test]
    fn test_tick_moves_and_draws() {
        let mut tick_loop = TickLoop::new(config(0, 0));
        let e = tick_loop
            .world
            .spawn()
            .insert(Position::new(0.0, 0.0))
            .insert(Velocity::new(10.0, 0.0))
            .insert(Sprite::new("ship.png", 0))
            .id();

        tick_loop.tick();

        let position = tick_loop.world().get_ref::<Position>(e).copied();
        assert_eq!(position, Some(Position::new(1.0, 0.0)));
        assert_eq!(tick_loop.draw_list().len(), 1);
        assert_eq!(tick_loop.draw_list()[0].position, Position::new(1.0, 0.0));
    }

    #[test]
    fn test_run_expires_lifetimes() {
        let mut tick_loop = TickLoop::new(config(9, 20));
        tick_loop.populate();
        tick_loop.run();
        let stats = tick_loop.stats();

        assert_eq!(stats.ticks, 20);
        assert_eq!(stats.destroyed, 3);
        assert_eq!(tick_loop.draw_list().len(), 6);
        assert_eq!(tick_loop.world().entity_count(), 6);
        let lifetimes = tick_loop.world().store::<Lifetime>();
        assert_eq!(lifetimes.map(|store| store.len()), Some(0));
    }
}
