//! # engine_app
//!
//! Headless demo of the engine. Spawns a ring of sprites, then runs the
//! lifetime, movement and draw-list systems on a fixed timestep. Ticks run
//! back to back unless `--realtime` asks for wall-clock pacing.
//!
//! Logging is controlled with `RUST_LOG` (default `engine_app=info`).

mod components;
mod config;
mod systems;
mod tick;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use tick::TickLoop;

#[derive(Debug, Parser)]
#[command(
    name = "engine_app",
    about = "Headless fixed-timestep demo of the 2D engine"
)]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate (overrides the config file)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Number of entities to spawn (overrides the config file)
    #[arg(short, long)]
    entities: Option<usize>,

    /// Pace ticks to the configured tick rate
    #[arg(long)]
    realtime: bool,
}

impl Args {
    fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(ticks) = self.ticks {
            config.max_ticks = ticks;
        }
        if let Some(entities) = self.entities {
            config.spawn_count = entities;
        }
        if self.realtime {
            config.realtime = true;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "engine_app=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = args.resolve()?;
    info!(
        tick_rate = config.tick_rate,
        max_ticks = config.max_ticks,
        spawn_count = config.spawn_count,
        "engine app starting"
    );

    let mut tick_loop = TickLoop::new(config);
    tick_loop.populate();
    tick_loop.run();

    let stats = tick_loop.stats();
    info!(
        tick_id = tick_loop.tick_id(),
        destroyed = stats.destroyed,
        overruns = stats.overruns,
        alive = tick_loop.world().entity_count(),
        draws = tick_loop.draw_list().len(),
        "engine app shut down"
    );
    Ok(())
}
