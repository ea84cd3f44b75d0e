//! Deterministic simulation module
//!
//! All engine logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only, threaded in explicitly
//! - Stable iteration order (by creature ID)
//! - No rendering, CLI or platform dependencies

pub mod board;
pub mod collision;
pub mod entity;
pub mod geometry;
pub mod kind;
pub mod spawn;
pub mod state;
pub mod tick;

pub use board::Board;
pub use collision::{
    ObstacleContact, bounce_off_obstacles, bounce_velocity, mirror_vector, obstacle_contact, reflect_off_walls,
    reflect_velocity,
};
pub use entity::{Creature, Obstacle, ObstacleKind};
pub use geometry::{Capsule, Circle, Polygon, Shape, closest_point_on_polygon, normalize, overlap, support_distance};
pub use kind::{Kind, rps_winner};
pub use spawn::{create_world, randomize_creature_speeds, spawn_creature, spawn_obstacles};
pub use state::{PairKey, WorldState, counts_by_kind, single_surviving_kind};
pub use tick::{Resolution, StepOptions, step};
