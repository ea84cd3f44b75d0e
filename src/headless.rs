//! Headless runner
//!
//! Drives a world from a config until one kind is left or the tick budget
//! runs out. No presentation layer involved.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::SimConfig;
use crate::sim::{Kind, counts_by_kind, create_world, single_surviving_kind, step};

/// How a headless run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlessOutcome {
    /// The only kind left alive, if the run ended with one
    pub winner: Option<Kind>,
    /// Tick at which the run stopped
    pub tick: u64,
    /// Survivors per kind at that tick
    pub counts: BTreeMap<Kind, usize>,
}

impl HeadlessOutcome {
    /// One-line human summary
    pub fn summary(&self) -> String {
        match self.winner {
            Some(kind) => format!("Winner: {kind} at tick {}", self.tick),
            None => {
                let counts = self
                    .counts
                    .iter()
                    .map(|(kind, n)| format!("{kind}={n}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("No winner after {} ticks. {counts}", self.tick)
            }
        }
    }
}

/// Run `config` for at most `max_ticks` steps of `dt` seconds each
///
/// The winner check happens before every step, so a world that starts with a
/// single kind ends at tick 0. `config` is expected to be validated.
pub fn run_headless(config: &SimConfig, max_ticks: u64, dt: f32) -> HeadlessOutcome {
    let options = config.step_options(dt);
    let mut world = create_world(config, config.random_seed);

    for _ in 0..max_ticks {
        if single_surviving_kind(&world).is_some() {
            break;
        }
        world = step(&world, &options);
    }

    let outcome = HeadlessOutcome {
        winner: single_surviving_kind(&world),
        tick: world.tick,
        counts: counts_by_kind(&world),
    };
    log::info!("{}", outcome.summary());
    outcome
}
