//! Run configuration
//!
//! Everything needed to build a world and drive it: board size, population,
//! obstacle field and the encounter rules. Loaded from JSON or built in code,
//! and validated before a world is ever created.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::sim::{Board, Resolution, StepOptions};

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Board ===
    /// Board width in cells
    pub board_width: u32,
    /// Board height in cells
    pub board_height: u32,
    /// Cell edge length in world units (pixels)
    pub cell_size: u32,

    // === Creatures ===
    pub creature_count: u32,
    /// Base speed in units per second
    pub creature_speed: f32,
    pub creature_radius: f32,
    pub creature_mass: f32,
    /// Spawn speeds are drawn from `[speed * min, speed * max]`
    pub min_speed_multiplier: f32,
    pub max_speed_multiplier: f32,

    // === Obstacles ===
    pub obstacle_count: u32,
    /// Average obstacle size; actual sizes vary from 0.6x to 1.4x
    pub obstacle_avg_size: f32,

    // === Rules ===
    /// Convert losers instead of removing them
    pub convert_loser_to_winner: bool,
    pub bounce_off_creatures: bool,
    pub grow_on_win: bool,

    // === Timing ===
    /// Global multiplier applied to every tick's elapsed time
    pub tps_multiplier: f32,
    pub random_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            board_width: 20,
            board_height: 15,
            cell_size: 32,

            creature_count: 10,
            creature_speed: 60.0,
            creature_radius: 8.0,
            creature_mass: 1.0,
            min_speed_multiplier: 0.75,
            max_speed_multiplier: 1.25,

            obstacle_count: 4,
            obstacle_avg_size: 32.0,

            convert_loser_to_winner: true,
            bounce_off_creatures: true,
            grow_on_win: false,

            tps_multiplier: 1.0,
            random_seed: 7,
        }
    }
}

impl SimConfig {
    /// Load and validate a JSON config; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config without validating it, for callers that layer
    /// overrides on top before calling `validate`
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range inputs before they reach the engine
    pub fn validate(&self) -> Result<()> {
        let floats = [
            ("creature_speed", self.creature_speed),
            ("creature_radius", self.creature_radius),
            ("creature_mass", self.creature_mass),
            ("min_speed_multiplier", self.min_speed_multiplier),
            ("max_speed_multiplier", self.max_speed_multiplier),
            ("obstacle_avg_size", self.obstacle_avg_size),
            ("tps_multiplier", self.tps_multiplier),
        ];
        if let Some(&(field, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite(field));
        }

        if self.creature_mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass(self.creature_mass));
        }
        if self.tps_multiplier <= 0.0 {
            return Err(ConfigError::NonPositiveTpsMultiplier(self.tps_multiplier));
        }
        if self.obstacle_avg_size < 0.0 {
            return Err(ConfigError::NegativeObstacleSize(self.obstacle_avg_size));
        }
        if self.min_speed_multiplier > self.max_speed_multiplier {
            return Err(ConfigError::InvertedSpeedMultipliers {
                min: self.min_speed_multiplier,
                max: self.max_speed_multiplier,
            });
        }
        let spawn_speeds = [
            self.creature_speed * self.min_speed_multiplier,
            self.creature_speed * self.max_speed_multiplier,
        ];
        if !spawn_speeds.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::NotFinite("creature_speed * speed multiplier"));
        }
        Ok(())
    }

    /// Check a per-tick `dt` against this config's tick multiplier
    pub fn validate_timestep(&self, dt: f32) -> Result<()> {
        if !dt.is_finite() || dt < 0.0 || !(dt * self.tps_multiplier).is_finite() {
            return Err(ConfigError::InvalidTimestep(dt));
        }
        Ok(())
    }

    /// Board in world units
    pub fn board(&self) -> Board {
        Board::new(
            self.board_width as f32 * self.cell_size as f32,
            self.board_height as f32 * self.cell_size as f32,
        )
    }

    pub fn resolution(&self) -> Resolution {
        if self.convert_loser_to_winner {
            Resolution::Conversion
        } else {
            Resolution::Elimination
        }
    }

    /// Step options for a tick of `dt` seconds (before the tick multiplier)
    pub fn step_options(&self, dt: f32) -> StepOptions {
        StepOptions {
            resolution: self.resolution(),
            bounce: self.bounce_off_creatures,
            grow_on_win: self.grow_on_win,
            encounter_distance: self.creature_radius * 2.0,
            default_radius: None,
            dt: dt * self.tps_multiplier,
        }
    }
}
