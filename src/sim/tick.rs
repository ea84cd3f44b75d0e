//! Per-tick simulation step
//!
//! Pipeline, in order:
//! 1. Move every creature, reflect off walls, push out of obstacles
//! 2. Scan creature pairs in ascending id order for contacts
//! 3. Bounce pairs whose contact just began
//! 4. Resolve kinds (conversion or elimination), optionally growing winners

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::collision::{bounce_off_obstacles, bounce_velocity, reflect_off_walls};
use super::entity::{Creature, Obstacle};
use super::geometry::overlap;
use super::kind::{Kind, rps_winner};
use super::state::{PairKey, WorldState};

/// What happens to the loser of a decisive encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Loser takes the winner's kind
    #[default]
    Conversion,
    /// Loser is removed from the world
    Elimination,
}

/// Per-tick parameters (deterministic)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOptions {
    pub resolution: Resolution,
    /// Creature-creature bounce on contact
    pub bounce: bool,
    /// Winner absorbs the loser's mass
    pub grow_on_win: bool,
    /// Contact distance used when either creature has radius 0
    pub encounter_distance: f32,
    /// Radius given to creatures whose own radius is 0
    pub default_radius: Option<f32>,
    /// Elapsed time in seconds
    pub dt: f32,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            resolution: Resolution::Conversion,
            bounce: true,
            grow_on_win: false,
            encounter_distance: 16.0,
            default_radius: None,
            dt: 1.0,
        }
    }
}

/// Advance the world by one tick, returning the successor state
pub fn step(world: &WorldState, options: &StepOptions) -> WorldState {
    let mut creatures: Vec<Creature> = world
        .creatures
        .iter()
        .map(|c| move_creature(*c, &world.board, &world.obstacles, options))
        .collect();
    creatures.sort_by_key(|c| c.id);

    let mut kinds: Vec<Kind> = creatures.iter().map(|c| c.kind).collect();
    let mut alive = vec![true; creatures.len()];
    let mut contacts = BTreeSet::new();
    let mut bounced = 0usize;
    let mut decided = 0usize;

    for li in 0..creatures.len() {
        if !alive[li] {
            continue;
        }
        for ri in (li + 1)..creatures.len() {
            if !alive[ri] {
                continue;
            }
            if !in_contact(&creatures[li], &creatures[ri], options.encounter_distance) {
                continue;
            }

            let pair = PairKey::new(creatures[li].id, creatures[ri].id);
            contacts.insert(pair);
            if options.bounce && !world.active_collision_pairs.contains(&pair) {
                let (left_vel, right_vel) = bounce_velocity(&creatures[li], &creatures[ri]);
                creatures[li].vel = left_vel;
                creatures[ri].vel = right_vel;
                bounced += 1;
            }

            let Some(winner) = rps_winner(kinds[li], kinds[ri]) else {
                continue;
            };
            decided += 1;
            let (w, l) = if winner == kinds[li] { (li, ri) } else { (ri, li) };
            if options.grow_on_win {
                let loser_mass = creatures[l].mass;
                creatures[w].grow(loser_mass);
            }

            match options.resolution {
                // Written immediately: later pairs this tick see the new kind
                Resolution::Conversion => kinds[l] = kinds[w],
                Resolution::Elimination => {
                    alive[l] = false;
                    if l == li {
                        break;
                    }
                }
            }
        }
    }

    // Pairs touching an eliminated creature do not carry over
    if alive.contains(&false) {
        let dead: BTreeSet<u32> = creatures
            .iter()
            .zip(&alive)
            .filter(|&(_, &alive)| !alive)
            .map(|(c, _)| c.id)
            .collect();
        contacts.retain(|pair| !dead.iter().any(|&id| pair.contains(id)));
    }

    let survivors: Vec<Creature> = creatures
        .into_iter()
        .zip(kinds)
        .zip(alive)
        .filter(|&(_, alive)| alive)
        .map(|((mut c, kind), _)| {
            c.kind = kind;
            c
        })
        .collect();

    log::debug!(
        "tick {}: {} contacts, {} bounces, {} decisive, {} survivors",
        world.tick + 1,
        contacts.len(),
        bounced,
        decided,
        survivors.len()
    );

    let mut next = WorldState {
        board: world.board,
        creatures: survivors,
        obstacles: world.obstacles.clone(),
        tick: world.tick + 1,
        active_collision_pairs: contacts,
    };
    next.normalize_order();
    next
}

/// Integrate one creature and resolve its wall and obstacle contacts
fn move_creature(creature: Creature, board: &Board, obstacles: &[Obstacle], options: &StepOptions) -> Creature {
    let mut moved = creature;
    if moved.radius <= 0.0 {
        moved.radius = options.default_radius.unwrap_or(0.0);
    }
    moved.pos += moved.vel * options.dt;

    let moved = reflect_off_walls(moved, board);
    bounce_off_obstacles(moved, obstacles)
}

/// Shape overlap, or a centre-distance test when either creature has no radius
fn in_contact(left: &Creature, right: &Creature, encounter_distance: f32) -> bool {
    if left.radius <= 0.0 || right.radius <= 0.0 {
        return left.pos.distance_squared(right.pos) <= encounter_distance * encounter_distance;
    }
    overlap(&left.shape(), &right.shape())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn world(board: Board, creatures: Vec<Creature>) -> WorldState {
        WorldState::new(board, creatures, Vec::new())
    }

    fn still(dt: f32) -> StepOptions {
        StepOptions {
            dt,
            ..Default::default()
        }
    }

    #[test]
    fn test_step_increments_tick() {
        let state = world(
            Board::new(4.0, 4.0),
            vec![Creature::new(1, Kind::Rock, Vec2::ZERO)],
        );
        let next = step(&state, &StepOptions::default());
        assert_eq!(next.tick, 1);
        assert_eq!(step(&next, &StepOptions::default()).tick, 2);
        // Input untouched
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn test_encounter_converts_loser() {
        let state = world(
            Board::new(3.0, 3.0),
            vec![
                Creature::new(1, Kind::Rock, Vec2::ONE),
                Creature::new(2, Kind::Scissors, Vec2::ONE),
            ],
        );
        let next = step(&state, &still(0.0));
        let kinds: Vec<Kind> = next.creatures.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![Kind::Rock, Kind::Rock]);
    }

    #[test]
    fn test_encounter_eliminates_loser() {
        let state = world(
            Board::new(3.0, 3.0),
            vec![
                Creature::new(1, Kind::Rock, Vec2::ONE),
                Creature::new(2, Kind::Scissors, Vec2::ONE),
            ],
        );
        let options = StepOptions {
            resolution: Resolution::Elimination,
            ..still(0.0)
        };
        let next = step(&state, &options);
        assert_eq!(next.creatures.len(), 1);
        assert_eq!(next.creatures[0].kind, Kind::Rock);
        assert_eq!(next.creatures[0].id, 1);
    }

    #[test]
    fn test_right_wall_reflection() {
        let state = world(
            Board::new(5.0, 5.0),
            vec![Creature::new(1, Kind::Paper, Vec2::new(4.0, 2.5)).with_velocity(Vec2::new(1.0, 0.0))],
        );
        let next = step(&state, &still(1.0));
        assert_eq!(next.creatures[0].pos.x, 5.0);
        assert_eq!(next.creatures[0].vel.x, -1.0);
    }

    #[test]
    fn test_wall_bounce_preserves_speed() {
        let v = Vec2::new(7.0, -3.0);
        let state = world(
            Board::new(20.0, 20.0),
            vec![
                Creature::new(1, Kind::Paper, Vec2::new(18.0, 2.0))
                    .with_velocity(v)
                    .with_radius(1.5),
            ],
        );
        let next = step(&state, &still(1.0));
        let c = next.creatures[0];
        assert_eq!(c.vel, Vec2::new(-7.0, 3.0));
        assert_eq!(c.vel.length(), v.length());
        assert!(c.pos.x <= 18.5 && c.pos.y >= 1.5);
    }

    #[test]
    fn test_default_radius_is_adopted() {
        let state = world(Board::new(50.0, 50.0), vec![Creature::new(1, Kind::Rock, Vec2::splat(25.0))]);
        let options = StepOptions {
            default_radius: Some(3.0),
            ..still(0.0)
        };
        assert_eq!(step(&state, &options).creatures[0].radius, 3.0);
    }

    #[test]
    fn test_one_shot_bounce_and_rearm() {
        // Two same-kind creatures overlapping, closing on each other
        let state = world(
            Board::new(100.0, 100.0),
            vec![
                Creature::new(1, Kind::Rock, Vec2::new(49.0, 50.0))
                    .with_velocity(Vec2::new(1.0, 0.0))
                    .with_radius(2.0),
                Creature::new(2, Kind::Rock, Vec2::new(51.0, 50.0))
                    .with_velocity(Vec2::new(-1.0, 0.0))
                    .with_radius(2.0),
            ],
        );
        let frozen = still(0.0);

        let first = step(&state, &frozen);
        assert_eq!(first.creatures[0].vel, Vec2::new(-1.0, 0.0));
        assert!(first.active_collision_pairs.contains(&PairKey::new(1, 2)));

        // Still overlapping: no second bounce
        let second = step(&first, &frozen);
        assert_eq!(second.creatures[0].vel, Vec2::new(-1.0, 0.0));
        assert!(second.active_collision_pairs.contains(&PairKey::new(1, 2)));

        // Separate for a tick, then overlap again: bounce re-arms
        let mut apart = second.clone();
        apart.creatures[1].pos = Vec2::new(80.0, 50.0);
        let separated = step(&apart, &frozen);
        assert!(separated.active_collision_pairs.is_empty());

        let mut together = separated.clone();
        together.creatures[1].pos = Vec2::new(51.0, 50.0);
        let rearmed = step(&together, &frozen);
        assert_eq!(rearmed.creatures[0].vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_bounce_disabled_keeps_velocity() {
        let state = world(
            Board::new(100.0, 100.0),
            vec![
                Creature::new(1, Kind::Rock, Vec2::new(49.0, 50.0))
                    .with_velocity(Vec2::new(1.0, 0.0))
                    .with_radius(2.0),
                Creature::new(2, Kind::Rock, Vec2::new(51.0, 50.0))
                    .with_velocity(Vec2::new(-1.0, 0.0))
                    .with_radius(2.0),
            ],
        );
        let options = StepOptions {
            bounce: false,
            ..still(0.0)
        };
        let next = step(&state, &options);
        assert_eq!(next.creatures[0].vel, Vec2::new(1.0, 0.0));
        assert_eq!(next.creatures[1].vel, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_conversions_cascade_in_id_order() {
        // 1 Paper, 2 Rock, 3 Scissors all touching.
        // (1,2): paper converts rock -> 2 paper
        // (1,3): scissors converts 1 -> 1 scissors
        // (2,3): scissors converts 2 -> 2 scissors
        let state = world(
            Board::new(10.0, 10.0),
            vec![
                Creature::new(1, Kind::Paper, Vec2::splat(5.0)),
                Creature::new(2, Kind::Rock, Vec2::splat(5.0)),
                Creature::new(3, Kind::Scissors, Vec2::splat(5.0)),
            ],
        );
        let next = step(&state, &still(0.0));
        let kinds: Vec<Kind> = next.creatures.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![Kind::Scissors, Kind::Scissors, Kind::Scissors]);
    }

    #[test]
    fn test_elimination_dead_left_stops_scanning() {
        // 1 Scissors dies to 2 Rock before it can meet 3 Paper
        let state = world(
            Board::new(10.0, 10.0),
            vec![
                Creature::new(1, Kind::Scissors, Vec2::splat(5.0)),
                Creature::new(2, Kind::Rock, Vec2::splat(5.0)),
                Creature::new(3, Kind::Paper, Vec2::splat(5.0)),
            ],
        );
        let options = StepOptions {
            resolution: Resolution::Elimination,
            ..still(0.0)
        };
        let next = step(&state, &options);
        // (1,2): rock wins, 1 dies. (2,3): paper wins, 2 dies.
        let ids: Vec<u32> = next.creatures.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3]);
        assert!(!next.active_collision_pairs.contains(&PairKey::new(1, 3)));
        assert!(next.active_collision_pairs.is_empty());
    }

    #[test]
    fn test_growth_adds_loser_mass() {
        let state = world(
            Board::new(100.0, 100.0),
            vec![
                Creature::new(1, Kind::Rock, Vec2::splat(50.0)).with_radius(2.0).with_mass(3.0),
                Creature::new(2, Kind::Scissors, Vec2::splat(50.0)).with_radius(2.0).with_mass(1.5),
            ],
        );
        let options = StepOptions {
            grow_on_win: true,
            bounce: false,
            ..still(0.0)
        };
        let next = step(&state, &options);
        let winner = next.creature(1).copied().unwrap();
        assert_eq!(winner.radius, 3.5);
        assert_eq!(winner.mass, 4.5);
        let loser = next.creature(2).copied().unwrap();
        assert_eq!(loser.kind, Kind::Rock);
        assert_eq!(loser.mass, 1.5);
    }

    #[test]
    fn test_growth_compounds_within_a_tick() {
        // Rock beats 2, then 3; 2 and 3 are both rock by the time they meet
        let state = world(
            Board::new(100.0, 100.0),
            vec![
                Creature::new(1, Kind::Rock, Vec2::splat(50.0)).with_radius(2.0),
                Creature::new(2, Kind::Scissors, Vec2::splat(50.0)).with_radius(2.0),
                Creature::new(3, Kind::Scissors, Vec2::splat(50.0)).with_radius(2.0),
            ],
        );
        let options = StepOptions {
            grow_on_win: true,
            bounce: false,
            ..still(0.0)
        };
        let next = step(&state, &options);
        let winner = next.creature(1).copied().unwrap();
        assert_eq!(winner.mass, 3.0);
        assert_eq!(winner.radius, 4.0);
        assert!(next.creatures.iter().all(|c| c.kind == Kind::Rock));
        assert_eq!(next.creature(2).map(|c| c.mass), Some(1.0));
        assert_eq!(next.creature(3).map(|c| c.mass), Some(1.0));

        // Growth persists and keeps compounding on the next tick
        let mut next = next;
        next.creatures
            .push(Creature::new(5, Kind::Scissors, Vec2::splat(50.0)).with_radius(2.0).with_mass(2.0));
        next.normalize_order();
        let after = step(&next, &options);
        let winner = after.creature(1).copied().unwrap();
        assert_eq!(winner.mass, 5.0);
        assert_eq!(winner.radius, 6.0);
        assert_eq!(after.creature(5).map(|c| c.kind), Some(Kind::Rock));
    }

    #[test]
    fn test_obstacles_carry_over() {
        use crate::sim::entity::{OBSTACLE_PALETTE, ObstacleKind};

        let obstacles = vec![Obstacle {
            kind: ObstacleKind::Square,
            pos: Vec2::splat(30.0),
            size: 4.0,
            rotation: 0.3,
            color: OBSTACLE_PALETTE[2],
        }];
        let state = WorldState::new(Board::new(60.0, 60.0), Vec::new(), obstacles.clone());
        assert_eq!(step(&state, &StepOptions::default()).obstacles, obstacles);
    }
}
