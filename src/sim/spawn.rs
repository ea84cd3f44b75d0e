//! World generation
//!
//! Obstacles and creatures are placed by rejection sampling. Every loop is
//! bounded: when it runs out of attempts the result degrades (a missing
//! obstacle, a creature touching an obstacle) instead of failing.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::board::Board;
use super::entity::{Creature, OBSTACLE_PALETTE, Obstacle, ObstacleKind};
use super::geometry::{Shape, overlap, support_distance};
use super::kind::Kind;
use super::state::WorldState;
use crate::config::SimConfig;
use crate::consts::*;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Place up to `count` mutually non-overlapping obstacles
///
/// A slot whose size cannot fit the board, or that finds no free spot within
/// the attempt budget, is dropped; fewer obstacles than requested is normal.
pub fn spawn_obstacles(rng: &mut impl Rng, board: &Board, count: u32, avg_size: f32) -> Vec<Obstacle> {
    let (min_size, max_size) = (avg_size * OBSTACLE_SIZE_MIN_FACTOR, avg_size * OBSTACLE_SIZE_MAX_FACTOR);
    if count == 0 || avg_size <= 0.0 || !min_size.is_finite() || !max_size.is_finite() {
        return Vec::new();
    }

    let mut obstacles: Vec<Obstacle> = Vec::with_capacity(count as usize);
    let mut shapes: Vec<Shape> = Vec::with_capacity(count as usize);

    'slots: for slot in 0..count {
        for _ in 0..OBSTACLE_PLACEMENT_ATTEMPTS {
            let size = rng.random_range(min_size..=max_size);
            if 2.0 * size > board.width || 2.0 * size > board.height {
                log::debug!("Obstacle slot {slot}: size {size:.1} does not fit the board");
                continue 'slots;
            }

            let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
            let rotation = rng.random_range(0.0..TAU);
            let color = OBSTACLE_PALETTE[rng.random_range(0..OBSTACLE_PALETTE.len())];
            let mut candidate = Obstacle {
                kind,
                pos: Vec2::ZERO,
                size,
                rotation,
                color,
            };

            // Keep the rotated outline, not just its centre, on the board
            let local = candidate.local_shape();
            let (min_x, max_x) = (
                support_distance(Vec2::NEG_X, &local),
                board.width - support_distance(Vec2::X, &local),
            );
            let (min_y, max_y) = (
                support_distance(Vec2::NEG_Y, &local),
                board.height - support_distance(Vec2::Y, &local),
            );
            if min_x > max_x || min_y > max_y {
                continue;
            }
            candidate.pos = Vec2::new(rng.random_range(min_x..=max_x), rng.random_range(min_y..=max_y));

            let shape = candidate.shape();
            if shapes.iter().any(|other| overlap(&shape, other)) {
                continue;
            }
            obstacles.push(candidate);
            shapes.push(shape);
            continue 'slots;
        }
        log::debug!("Obstacle slot {slot}: no free spot after {OBSTACLE_PLACEMENT_ATTEMPTS} attempts");
    }

    obstacles
}

/// Spawn one creature of a random kind, heading in a random direction
///
/// The position is redrawn while the creature overlaps an obstacle; after the
/// retry budget the last draw is kept even if it is still blocked.
pub fn spawn_creature(
    rng: &mut impl Rng,
    board: &Board,
    id: u32,
    speed: f32,
    radius: f32,
    mass: f32,
    obstacles: &[Obstacle],
) -> Creature {
    let kind = Kind::ALL[rng.random_range(0..Kind::ALL.len())];

    let (min_x, max_x) = (radius, board.width - radius);
    let (min_y, max_y) = (radius, board.height - radius);

    let pos = if min_x > max_x || min_y > max_y {
        board.center()
    } else {
        let blocked = |pos: Vec2| {
            let probe = Creature::new(id, kind, pos).with_radius(radius).shape();
            obstacles.iter().any(|o| overlap(&probe, &o.shape()))
        };

        let mut pos = Vec2::new(rng.random_range(min_x..=max_x), rng.random_range(min_y..=max_y));
        let mut retries = 0;
        while blocked(pos) {
            if retries == CREATURE_PLACEMENT_RETRIES {
                log::debug!("Creature {id}: no obstacle-free spot, keeping ({:.1}, {:.1})", pos.x, pos.y);
                break;
            }
            pos = Vec2::new(rng.random_range(min_x..=max_x), rng.random_range(min_y..=max_y));
            retries += 1;
        }
        pos
    };

    let heading = rng.random_range(0.0..TAU);
    Creature {
        id,
        kind,
        pos,
        vel: polar_to_cartesian(speed, heading),
        radius,
        mass,
    }
}

/// Redraw each creature's speed in `[min_speed, max_speed]`, keeping its heading
pub fn randomize_creature_speeds(
    creatures: &[Creature],
    rng: &mut impl Rng,
    min_speed: f32,
    max_speed: f32,
) -> Vec<Creature> {
    if !min_speed.is_finite() || !max_speed.is_finite() {
        log::debug!("Speed bounds {min_speed}..{max_speed} are not finite, keeping spawn speeds");
        return creatures.to_vec();
    }
    let (lo, hi) = if min_speed <= max_speed {
        (min_speed, max_speed)
    } else {
        (max_speed, min_speed)
    };

    creatures
        .iter()
        .map(|c| {
            let speed = rng.random_range(lo..=hi);
            let (_, heading) = cartesian_to_polar(c.vel);
            Creature {
                vel: polar_to_cartesian(speed, heading),
                ..*c
            }
        })
        .collect()
}

/// Build a fresh world from a (validated) config
///
/// All randomness comes from a PCG stream seeded with `seed`, so the same
/// config and seed always produce the same world.
pub fn create_world(config: &SimConfig, seed: u64) -> WorldState {
    let mut rng = Pcg32::seed_from_u64(seed);
    let board = config.board();

    let obstacles = spawn_obstacles(&mut rng, &board, config.obstacle_count, config.obstacle_avg_size);
    let creatures: Vec<Creature> = (0..config.creature_count)
        .map(|id| {
            spawn_creature(
                &mut rng,
                &board,
                id,
                config.creature_speed,
                config.creature_radius,
                config.creature_mass,
                &obstacles,
            )
        })
        .collect();
    let creatures = randomize_creature_speeds(
        &creatures,
        &mut rng,
        config.creature_speed * config.min_speed_multiplier,
        config.creature_speed * config.max_speed_multiplier,
    );

    log::info!(
        "Created {}x{} world (seed {}): {} creatures, {}/{} obstacles",
        board.width,
        board.height,
        seed,
        creatures.len(),
        obstacles.len(),
        config.obstacle_count
    );

    WorldState::new(board, creatures, obstacles)
}
