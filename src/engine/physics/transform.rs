// World-space resolution of collision bodies

use glam::DVec2;

use super::shape::{CollisionBody, Shape};
use crate::core::math::{is_whole_turn, rotate_about};

/// A body's geometry expressed in world coordinates
///
/// Always derived on demand from a body and a position; never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape {
    /// Corners in order top-left, top-right, bottom-right, bottom-left (before rotation)
    Rect {
        corners: [DVec2; 4],
        /// Rotation in radians, 0.0 when the rectangle is axis-aligned
        rotation: f64,
    },
    Circle { center: DVec2, radius: f64 },
}

impl WorldShape {
    /// Geometric center
    pub fn center(&self) -> DVec2 {
        match self {
            WorldShape::Rect { corners, .. } => (corners[0] + corners[2]) / 2.0,
            WorldShape::Circle { center, .. } => *center,
        }
    }

    /// Axis-aligned bounding box as (min, max)
    pub fn bounds(&self) -> (DVec2, DVec2) {
        match self {
            WorldShape::Rect { corners, .. } => corners.iter().fold(
                (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
                |(min, max), c| (min.min(*c), max.max(*c)),
            ),
            WorldShape::Circle { center, radius } => {
                (*center - DVec2::splat(*radius), *center + DVec2::splat(*radius))
            }
        }
    }

    /// True for unrotated rectangles and for every circle
    pub fn is_axis_aligned(&self) -> bool {
        match self {
            WorldShape::Rect { rotation, .. } => *rotation == 0.0,
            WorldShape::Circle { .. } => true,
        }
    }
}

/// Resolve a body placed at `position` into world space
pub fn resolve(body: &CollisionBody, position: DVec2) -> WorldShape {
    let center = position + body.local_center();

    match body.shape() {
        Shape::Rect { width, height } => {
            let min = position + body.offset();
            let local = [
                min,
                min + DVec2::new(width, 0.0),
                min + DVec2::new(width, height),
                min + DVec2::new(0.0, height),
            ];

            let degrees = body.rotation_degrees();
            if is_whole_turn(degrees) {
                return WorldShape::Rect {
                    corners: local,
                    rotation: 0.0,
                };
            }

            let angle = degrees.to_radians();
            WorldShape::Rect {
                corners: local.map(|corner| rotate_about(corner, center, angle)),
                rotation: angle,
            }
        }
        Shape::Circle { radius } => WorldShape::Circle { center, radius },
    }
}
