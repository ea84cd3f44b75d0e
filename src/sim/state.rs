//! World state snapshot and queries
//!
//! A `WorldState` is a complete, self-contained value: stepping reads one and
//! returns the next, so any earlier snapshot stays valid.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::entity::{Creature, Obstacle};
use super::kind::Kind;

/// Unordered pair of creature ids, stored low id first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey(u32, u32);

impl PairKey {
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn low(&self) -> u32 {
        self.0
    }

    pub fn high(&self) -> u32 {
        self.1
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0 == id || self.1 == id
    }
}

/// Complete simulation snapshot (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub board: Board,
    /// Live creatures (sorted by id for determinism)
    pub creatures: Vec<Creature>,
    /// Static obstacles, in placement order
    pub obstacles: Vec<Obstacle>,
    /// Simulation tick counter
    pub tick: u64,
    /// Creature pairs in contact during the tick that produced this state
    #[serde(default)]
    pub active_collision_pairs: BTreeSet<PairKey>,
}

impl WorldState {
    /// Fresh world at tick 0 with no recorded contacts
    pub fn new(board: Board, creatures: Vec<Creature>, obstacles: Vec<Obstacle>) -> Self {
        let mut state = Self {
            board,
            creatures,
            obstacles,
            tick: 0,
            active_collision_pairs: BTreeSet::new(),
        };
        state.normalize_order();
        state
    }

    /// Ensure creatures are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.creatures.sort_by_key(|c| c.id);
    }

    pub fn creature(&self, id: u32) -> Option<&Creature> {
        self.creatures
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|i| &self.creatures[i])
    }
}

/// Surviving creatures per kind; every kind is present, possibly with 0
pub fn counts_by_kind(world: &WorldState) -> BTreeMap<Kind, usize> {
    let mut counts: BTreeMap<Kind, usize> = Kind::ALL.into_iter().map(|k| (k, 0)).collect();
    for creature in &world.creatures {
        *counts.entry(creature.kind).or_default() += 1;
    }
    counts
}

/// The only kind still alive, or `None` when zero or several kinds remain
pub fn single_surviving_kind(world: &WorldState) -> Option<Kind> {
    let mut alive = counts_by_kind(world)
        .into_iter()
        .filter(|&(_, n)| n > 0)
        .map(|(kind, _)| kind);
    match (alive.next(), alive.next()) {
        (Some(kind), None) => Some(kind),
        _ => None,
    }
}
