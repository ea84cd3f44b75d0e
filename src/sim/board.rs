//! Rectangular arena bounds

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The arena rectangle `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: f32,
    pub height: f32,
}

impl Board {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Inclusive containment test
    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }

    /// Clamp a point onto the board
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.min(self.width).max(0.0), pos.y.min(self.height).max(0.0))
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}
