use glam::DVec2;
use std::collections::BTreeSet;

use super::transform::{resolve, WorldShape};
use super::world::{Entity, EntityRegistry};
use super::PhysicsResult;
use crate::core::math::{intervals_overlap, intervals_overlap_approx, project};

/// Named collision groups used to filter which entities can collide
///
/// An entity without groups interacts with everything. Two entities that both
/// declare groups only interact when they share at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionGroups {
    groups: BTreeSet<String>,
}

impl CollisionGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, returns false if it was already present
    pub fn insert(&mut self, group: impl Into<String>) -> bool {
        self.groups.insert(group.into())
    }

    /// Remove a group, returns false if it was not present
    pub fn remove(&mut self, group: &str) -> bool {
        self.groups.remove(group)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(String::as_str)
    }

    /// Check whether two group sets allow a collision
    pub fn interacts_with(&self, other: &CollisionGroups) -> bool {
        if self.is_empty() || other.is_empty() {
            return true;
        }
        self.groups.intersection(&other.groups).next().is_some()
    }
}

/// Static overlap query between two registered entities
///
/// Fails with `UnknownEntity` when either name is not registered.
pub fn test(registry: &EntityRegistry, name_a: &str, name_b: &str) -> PhysicsResult<bool> {
    let a = registry.require(name_a)?;
    let b = registry.require(name_b)?;
    Ok(entities_overlap_at(a, a.position(), b, b.position()))
}

/// Overlap test for two entities placed at arbitrary positions
///
/// Group filtering runs before any geometry is resolved.
pub fn entities_overlap_at(a: &Entity, pos_a: DVec2, b: &Entity, pos_b: DVec2) -> bool {
    if !a.collision_groups().interacts_with(b.collision_groups()) {
        return false;
    }
    let shape_a = resolve(a.body(), pos_a);
    let shape_b = resolve(b.body(), pos_b);
    shapes_overlap(&shape_a, &shape_b)
}

/// Overlap test between two world-space shapes
///
/// Boundaries are inclusive: shapes that exactly touch are colliding.
pub fn shapes_overlap(a: &WorldShape, b: &WorldShape) -> bool {
    match (a, b) {
        (
            WorldShape::Rect {
                corners: corners_a, ..
            },
            WorldShape::Rect {
                corners: corners_b, ..
            },
        ) => {
            if a.is_axis_aligned() && b.is_axis_aligned() {
                aabb_overlap(a.bounds(), b.bounds())
            } else {
                sat_overlap(corners_a, corners_b)
            }
        }
        (WorldShape::Rect { corners, .. }, WorldShape::Circle { center, radius })
        | (WorldShape::Circle { center, radius }, WorldShape::Rect { corners, .. }) => {
            rect_circle_overlap(corners, *center, *radius)
        }
        (
            WorldShape::Circle {
                center: center_a,
                radius: radius_a,
            },
            WorldShape::Circle {
                center: center_b,
                radius: radius_b,
            },
        ) => {
            let reach = radius_a + radius_b;
            center_a.distance_squared(*center_b) <= reach * reach
        }
    }
}

fn aabb_overlap((min_a, max_a): (DVec2, DVec2), (min_b, max_b): (DVec2, DVec2)) -> bool {
    intervals_overlap((min_a.x, max_a.x), (min_b.x, max_b.x))
        && intervals_overlap((min_a.y, max_a.y), (min_b.y, max_b.y))
}

/// Separating-axis test for two rectangles
///
/// A rectangle's edge directions double as its face normals, so the candidate
/// axes are the two edge directions of each rectangle. Rotated corners carry
/// rounding error, so touching is decided with a relative tolerance.
fn sat_overlap(a: &[DVec2; 4], b: &[DVec2; 4]) -> bool {
    let axes = [a[1] - a[0], a[3] - a[0], b[1] - b[0], b[3] - b[0]];

    axes.iter()
        .all(|axis| intervals_overlap_approx(project(a, *axis), project(b, *axis)))
}

/// Closest-point test between a (possibly rotated) rectangle and a circle
fn rect_circle_overlap(corners: &[DVec2; 4], center: DVec2, radius: f64) -> bool {
    let rect_center = (corners[0] + corners[2]) / 2.0;
    let along_x = corners[1] - corners[0];
    let along_y = corners[3] - corners[0];
    let half_x = along_x.length() / 2.0;
    let half_y = along_y.length() / 2.0;
    let u = along_x.normalize();
    let v = along_y.normalize();

    let d = center - rect_center;
    let local_x = d.dot(u).clamp(-half_x, half_x);
    let local_y = d.dot(v).clamp(-half_y, half_y);
    let closest = rect_center + u * local_x + v * local_y;

    closest.distance_squared(center) <= radius * radius
}
