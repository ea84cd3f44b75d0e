//! Creature kinds and the rock-paper-scissors relation

use std::fmt;

use serde::{Deserialize, Serialize};

/// Creature kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Rock,
    Paper,
    Scissors,
}

impl Kind {
    /// All kinds, in a fixed order (used for uniform draws and counting)
    pub const ALL: [Kind; 3] = [Kind::Rock, Kind::Paper, Kind::Scissors];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Rock => "rock",
            Kind::Paper => "paper",
            Kind::Scissors => "scissors",
        }
    }

    /// The kind this one defeats
    pub fn beats(&self) -> Kind {
        match self {
            Kind::Rock => Kind::Scissors,
            Kind::Scissors => Kind::Paper,
            Kind::Paper => Kind::Rock,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Winning kind of an encounter, or `None` for a tie
pub fn rps_winner(a: Kind, b: Kind) -> Option<Kind> {
    if a == b {
        None
    } else if a.beats() == b {
        Some(a)
    } else {
        Some(b)
    }
}
