//! Creature and obstacle records

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Polygon, Shape};
use super::kind::Kind;

/// A mobile creature
///
/// `id` is the only identity that survives across ticks; everything else is
/// rewritten each step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: u32,
    pub kind: Kind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Circle radius; 0 means the step options' fallback radius applies
    pub radius: f32,
    pub mass: f32,
}

impl Creature {
    /// Stationary, radius-0, unit-mass creature
    pub fn new(id: u32, kind: Kind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius: 0.0,
            mass: 1.0,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Collision shape in world coordinates
    pub fn shape(&self) -> Shape {
        Circle::new(self.pos, self.radius).into()
    }

    /// Collision shape relative to `pos` (for support distances)
    pub fn local_shape(&self) -> Shape {
        Circle::new(Vec2::ZERO, self.radius).into()
    }

    /// Absorb a defeated creature's mass into both radius and mass
    pub fn grow(&mut self, amount: f32) {
        self.radius += amount;
        self.mass += amount;
    }
}

/// Obstacle outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Circle,
    Square,
    Triangle,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Circle, ObstacleKind::Square, ObstacleKind::Triangle];
}

/// Fill colours handed to the presentation layer
pub const OBSTACLE_PALETTE: [[u8; 3]; 5] = [
    [120, 125, 135],
    [165, 109, 86],
    [98, 140, 110],
    [143, 112, 168],
    [184, 146, 79],
];

/// A static obstacle; never moves once placed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Centre
    pub pos: Vec2,
    /// Circle radius, or half-extent of the square/triangle outline
    pub size: f32,
    /// Radians
    pub rotation: f32,
    /// Presentation only
    pub color: [u8; 3],
}

impl Obstacle {
    /// Outline centred on the origin, rotated
    pub fn local_shape(&self) -> Shape {
        let s = self.size;
        let outline = match self.kind {
            ObstacleKind::Circle => return Circle::new(Vec2::ZERO, s).into(),
            ObstacleKind::Square => vec![
                Vec2::new(-s, -s),
                Vec2::new(s, -s),
                Vec2::new(s, s),
                Vec2::new(-s, s),
            ],
            ObstacleKind::Triangle => vec![Vec2::new(0.0, -s), Vec2::new(-s, s), Vec2::new(s, s)],
        };
        let rot = Vec2::from_angle(self.rotation);
        Polygon::new(outline.into_iter().map(|p| rot.rotate(p)).collect()).into()
    }

    /// Outline in world coordinates
    pub fn shape(&self) -> Shape {
        match self.local_shape() {
            Shape::Circle(c) => Circle::new(c.center + self.pos, c.radius).into(),
            Shape::Polygon(p) => Polygon::new(p.vertices.into_iter().map(|v| v + self.pos).collect()).into(),
            capsule @ Shape::Capsule(_) => capsule,
        }
    }
}
