//! RPS Arena - rock/paper/scissors creatures bouncing around an obstacle field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, kind resolution, world state)
//! - `config`: Validated run configuration
//! - `headless`: Run a world to completion without a presentation layer

pub mod config;
pub mod error;
pub mod headless;
pub mod sim;

pub use config::SimConfig;
pub use error::ConfigError;
pub use headless::{HeadlessOutcome, run_headless};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Default seconds per tick for headless runs (60 Hz)
    pub const HEADLESS_DT: f32 = 1.0 / 60.0;
    /// Default tick budget for headless runs
    pub const DEFAULT_MAX_TICKS: u64 = 10_000;

    /// Placement attempts per obstacle slot before the slot is dropped
    pub const OBSTACLE_PLACEMENT_ATTEMPTS: usize = 50;
    /// Redraws of a creature position while it overlaps an obstacle
    pub const CREATURE_PLACEMENT_RETRIES: usize = 99;
    /// Obstacle size range as multiples of the average size
    pub const OBSTACLE_SIZE_MIN_FACTOR: f32 = 0.6;
    pub const OBSTACLE_SIZE_MAX_FACTOR: f32 = 1.4;

    /// Guard against a zero total mass in the bounce blend
    pub const MIN_TOTAL_MASS: f32 = 0.000_001;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(v: Vec2) -> (f32, f32) {
    (v.length(), v.y.atan2(v.x))
}
