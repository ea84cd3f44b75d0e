//! Collision response for creatures
//!
//! Walls and obstacles reflect a single creature; creature pairs exchange
//! momentum through an approximate mass-weighted mirror along the contact axis.

use glam::Vec2;

use super::board::Board;
use super::entity::{Creature, Obstacle};
use super::geometry::{Shape, closest_point_on_polygon, closest_point_on_segment, normalize, overlap, support_distance};
use crate::consts::MIN_TOTAL_MASS;

/// Contact between a creature and an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleContact {
    /// Unit normal pointing from the obstacle surface toward the creature
    pub normal: Vec2,
    /// Point on the obstacle surface the creature is pushed out from
    pub surface: Vec2,
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Mirror `v` across the line spanned by `axis` (axis need not be unit length)
///
/// A zero axis leaves `v` unchanged.
pub fn mirror_vector(axis: Vec2, v: Vec2) -> Vec2 {
    let axis_len_sq = axis.length_squared();
    if axis_len_sq == 0.0 {
        return v;
    }
    let parallel = axis * (v.dot(axis) / axis_len_sq);
    2.0 * parallel - v
}

/// Check a creature against an obstacle, returning the push-out normal and surface point
pub fn obstacle_contact(creature: &Creature, obstacle: &Obstacle) -> Option<ObstacleContact> {
    let obstacle_shape = obstacle.shape();
    if !overlap(&creature.shape(), &obstacle_shape) {
        return None;
    }

    let contact = match obstacle_shape {
        Shape::Circle(c) => {
            let normal = normalize(creature.pos - c.center);
            ObstacleContact {
                normal,
                surface: c.center + normal * c.radius,
            }
        }
        Shape::Polygon(p) => {
            let closest = closest_point_on_polygon(creature.pos, &p);
            ObstacleContact {
                normal: normalize(creature.pos - closest),
                surface: closest,
            }
        }
        Shape::Capsule(k) => {
            let closest = closest_point_on_segment(creature.pos, k.start, k.end);
            let normal = normalize(creature.pos - closest);
            ObstacleContact {
                normal,
                surface: closest + normal * k.radius,
            }
        }
    };
    Some(contact)
}

/// Keep a creature inside the board, flipping the velocity component of any
/// wall it reaches while moving into it
///
/// Clearance uses the creature shape's support distance toward each wall,
/// so the shape ends flush with the edge rather than its centre.
pub fn reflect_off_walls(creature: Creature, board: &Board) -> Creature {
    let shape = creature.local_shape();
    let right = support_distance(Vec2::X, &shape);
    let left = support_distance(Vec2::NEG_X, &shape);
    let down = support_distance(Vec2::Y, &shape);
    let up = support_distance(Vec2::NEG_Y, &shape);

    let mut next = creature;
    let (x, vx) = reflect_axis(next.pos.x, next.vel.x, left, board.width - right);
    let (y, vy) = reflect_axis(next.pos.y, next.vel.y, up, board.height - down);
    next.pos = Vec2::new(x, y);
    next.vel = Vec2::new(vx, vy);
    next
}

/// One axis of the wall response; the lower bound wins when `low > high`
fn reflect_axis(value: f32, vel: f32, low: f32, high: f32) -> (f32, f32) {
    let hits = value < low || value > high || (value <= low && vel < 0.0) || (value >= high && vel > 0.0);
    if hits {
        (value.min(high).max(low), -vel)
    } else {
        (value, vel)
    }
}

/// Push a creature out of every obstacle it overlaps, in list order
///
/// Each correction is applied before the next obstacle is tested; the pass
/// is not repeated, so a creature wedged between obstacles may still overlap
/// one of them afterwards.
pub fn bounce_off_obstacles(creature: Creature, obstacles: &[Obstacle]) -> Creature {
    let mut next = creature;
    for obstacle in obstacles {
        let Some(contact) = obstacle_contact(&next, obstacle) else {
            continue;
        };
        let extent = support_distance(contact.normal, &next.local_shape());
        next.pos = contact.surface + contact.normal * extent;
        next.vel = reflect_velocity(next.vel, contact.normal);
    }
    next
}

/// New velocities for a pair of creatures coming into contact
///
/// Both velocities are reflected across the plane perpendicular to the
/// contact axis, then blended from the current velocity toward the reflection by
/// `min(1, 2·m_other / (m_self + m_other))`. A 1D elastic approximation,
/// not an exact 2D solution.
pub fn bounce_velocity(left: &Creature, right: &Creature) -> (Vec2, Vec2) {
    let mut axis = left.pos - right.pos;
    if axis == Vec2::ZERO {
        axis = left.vel - right.vel;
        if axis == Vec2::ZERO {
            axis = Vec2::X;
        }
    }

    let target_left = -mirror_vector(axis, left.vel);
    let target_right = -mirror_vector(axis, right.vel);

    let total_mass = (left.mass + right.mass).max(MIN_TOTAL_MASS);
    let left_factor = (2.0 * right.mass / total_mass).min(1.0);
    let right_factor = (2.0 * left.mass / total_mass).min(1.0);

    (
        left.vel + (target_left - left.vel) * left_factor,
        right.vel + (target_right - right.vel) * right_factor,
    )
}
