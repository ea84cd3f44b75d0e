//! Shape primitives and pairwise overlap tests
//!
//! Creatures are circles, obstacles are circles or small polygons. Capsules
//! complete the pair table so every combination of primitives can be tested.
//! Polygons are tested by edge intersection plus point-in-polygon, which is
//! also correct for the non-convex case.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A filled circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// A segment swept by a circle (stadium shape)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    pub start: Vec2,
    pub end: Vec2,
    pub radius: f32,
}

impl Capsule {
    pub fn new(start: Vec2, end: Vec2, radius: f32) -> Self {
        Self { start, end, radius }
    }
}

/// A closed polygon given by its ordered vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Edges as `(start, end)` pairs, the last one closing back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Crossing-number point containment
    pub fn contains_point(&self, point: Vec2) -> bool {
        let mut inside = false;
        for (left, right) in self.edges() {
            let straddles = (left.y > point.y) != (right.y > point.y);
            if straddles
                && point.x < (right.x - left.x) * (point.y - left.y) / (right.y - left.y) + left.x
            {
                inside = !inside;
            }
        }
        inside
    }
}

/// Closed set of collision primitives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Capsule(Capsule),
    Polygon(Polygon),
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

impl From<Capsule> for Shape {
    fn from(c: Capsule) -> Self {
        Shape::Capsule(c)
    }
}

impl From<Polygon> for Shape {
    fn from(p: Polygon) -> Self {
        Shape::Polygon(p)
    }
}

/// Check whether two shapes overlap (touching counts)
pub fn overlap(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Circle(l), Shape::Circle(r)) => circle_circle_overlap(l, r),
        (Shape::Circle(c), Shape::Polygon(p)) | (Shape::Polygon(p), Shape::Circle(c)) => {
            circle_polygon_overlap(c, p)
        }
        (Shape::Polygon(l), Shape::Polygon(r)) => polygon_polygon_overlap(l, r),
        (Shape::Circle(c), Shape::Capsule(k)) | (Shape::Capsule(k), Shape::Circle(c)) => {
            circle_capsule_overlap(c, k)
        }
        (Shape::Polygon(p), Shape::Capsule(k)) | (Shape::Capsule(k), Shape::Polygon(p)) => {
            polygon_capsule_overlap(p, k)
        }
        (Shape::Capsule(l), Shape::Capsule(r)) => capsule_capsule_overlap(l, r),
    }
}

pub fn circle_circle_overlap(left: &Circle, right: &Circle) -> bool {
    let radius_sum = left.radius + right.radius;
    left.center.distance_squared(right.center) <= radius_sum * radius_sum
}

pub fn circle_polygon_overlap(circle: &Circle, polygon: &Polygon) -> bool {
    if polygon.contains_point(circle.center) {
        return true;
    }
    let r_sq = circle.radius * circle.radius;
    polygon
        .edges()
        .any(|(start, end)| distance_sq_point_segment(circle.center, start, end) <= r_sq)
}

pub fn polygon_polygon_overlap(left: &Polygon, right: &Polygon) -> bool {
    for (start, end) in left.edges() {
        for (other_start, other_end) in right.edges() {
            if segments_intersect(start, end, other_start, other_end) {
                return true;
            }
        }
    }

    // No crossing edges: overlap only if one polygon sits entirely inside the other
    let left_in_right = left.vertices.first().is_some_and(|&v| right.contains_point(v));
    let right_in_left = right.vertices.first().is_some_and(|&v| left.contains_point(v));
    left_in_right || right_in_left
}

pub fn circle_capsule_overlap(circle: &Circle, capsule: &Capsule) -> bool {
    let radius_sum = circle.radius + capsule.radius;
    distance_sq_point_segment(circle.center, capsule.start, capsule.end) <= radius_sum * radius_sum
}

pub fn capsule_capsule_overlap(left: &Capsule, right: &Capsule) -> bool {
    if segments_intersect(left.start, left.end, right.start, right.end) {
        return true;
    }

    let radius_sum = left.radius + right.radius;
    let closest = [
        distance_sq_point_segment(left.start, right.start, right.end),
        distance_sq_point_segment(left.end, right.start, right.end),
        distance_sq_point_segment(right.start, left.start, left.end),
        distance_sq_point_segment(right.end, left.start, left.end),
    ]
    .into_iter()
    .fold(f32::INFINITY, f32::min);
    closest <= radius_sum * radius_sum
}

pub fn polygon_capsule_overlap(polygon: &Polygon, capsule: &Capsule) -> bool {
    if polygon.contains_point(capsule.start) || polygon.contains_point(capsule.end) {
        return true;
    }
    polygon
        .edges()
        .any(|(start, end)| capsule_capsule_overlap(capsule, &Capsule::new(start, end, 0.0)))
}

/// Closest point to `point` on the segment `start..end`
pub fn closest_point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> Vec2 {
    let seg = end - start;
    let seg_len_sq = seg.length_squared();
    if seg_len_sq == 0.0 {
        return start;
    }
    let t = ((point - start).dot(seg) / seg_len_sq).clamp(0.0, 1.0);
    start + seg * t
}

pub fn distance_sq_point_segment(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    point.distance_squared(closest_point_on_segment(point, start, end))
}

/// Signed area test: >0 when `c` is left of `a -> b`
#[inline]
fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Whether `b` lies inside the bounding box of `a` and `c`
#[inline]
fn on_segment(a: Vec2, b: Vec2, c: Vec2) -> bool {
    a.x.min(c.x) <= b.x && b.x <= a.x.max(c.x) && a.y.min(c.y) <= b.y && b.y <= a.y.max(c.y)
}

pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);

    if (o1 > 0.0) != (o2 > 0.0) && (o3 > 0.0) != (o4 > 0.0) {
        return true;
    }

    // Collinear touching cases
    (o1 == 0.0 && on_segment(a1, b1, a2))
        || (o2 == 0.0 && on_segment(a1, b2, a2))
        || (o3 == 0.0 && on_segment(b1, a1, b2))
        || (o4 == 0.0 && on_segment(b1, a2, b2))
}

/// Closest point on the polygon boundary
///
/// Falls back to the first vertex when no edge is strictly closer, and to the
/// query point itself for a polygon with no vertices.
pub fn closest_point_on_polygon(point: Vec2, polygon: &Polygon) -> Vec2 {
    let Some(&first) = polygon.vertices.first() else {
        return point;
    };

    let mut best = first;
    let mut best_dist = point.distance_squared(first);
    for (start, end) in polygon.edges() {
        let candidate = closest_point_on_segment(point, start, end);
        let dist = point.distance_squared(candidate);
        if dist < best_dist {
            best = candidate;
            best_dist = dist;
        }
    }
    best
}

/// Maximum extent of a shape along a unit `direction`
///
/// Shapes are expected in local coordinates (reference point at the origin).
/// A circle extends its radius in every direction.
pub fn support_distance(direction: Vec2, shape: &Shape) -> f32 {
    match shape {
        Shape::Circle(c) => c.radius,
        Shape::Capsule(k) => k.start.dot(direction).max(k.end.dot(direction)) + k.radius,
        Shape::Polygon(p) => p
            .vertices
            .iter()
            .map(|v| v.dot(direction))
            .reduce(f32::max)
            .unwrap_or(0.0),
    }
}

/// Unit vector in the direction of `v`, or +X for a zero vector
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let magnitude = v.length();
    if magnitude == 0.0 {
        Vec2::X
    } else {
        v / magnitude
    }
}
