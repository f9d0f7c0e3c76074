//! App configuration.
//!
//! Loaded from an optional JSON file. Missing fields take their defaults, and
//! CLI flags override the file.

use std::path::Path;

use anyhow::{Context, Result};
use engine_ecs::WorldConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration for the demo app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Simulated ticks per second.
    pub tick_rate: f64,
    /// Number of ticks to simulate.
    pub max_ticks: u64,
    /// Entities spawned before the first tick.
    pub spawn_count: usize,
    /// Sleep off the rest of each tick's budget instead of running ticks
    /// back to back.
    pub realtime: bool,
    /// Configuration for the world.
    pub world: WorldConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 600,
            spawn_count: 256,
            realtime: false,
            world: WorldConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid app config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("loading config {}", path.display()))
    }

    /// Seconds per tick.
    #[must_use]
    pub fn dt(&self) -> f32 {
        (1.0 / self.tick_rate) as f32
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.tick_rate.is_finite() && self.tick_rate > 0.0,
            "tick_rate must be positive, got {}",
            self.tick_rate
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use engine_ecs::{DestroyPolicy, QueryOrder};

    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = AppConfig::from_json(
            r#"{
                "tick_rate": 30.0,
                "world": { "destroy_policy": "strict", "query_order": "smallest_first" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.tick_rate, 30.0);
        assert_eq!(config.max_ticks, 600);
        assert!(!config.realtime);
        assert_eq!(config.world.destroy_policy, DestroyPolicy::Strict);
        assert_eq!(config.world.query_order, QueryOrder::SmallestFirst);
    }

    #[test]
    fn test_realtime_flag() {
        let config = AppConfig::from_json(r#"{ "realtime": true }"#).unwrap();
        assert!(config.realtime);
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        assert!(AppConfig::from_json(r#"{ "tick_rate": 0.0 }"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(AppConfig::from_json("{ tick_rate").is_err());
    }

    #[test]
    fn test_dt() {
        let config = AppConfig {
            tick_rate: 50.0,
            ..AppConfig::default()
        };
        assert!((config.dt() - 0.02).abs() < f32::EPSILON);
    }
}
