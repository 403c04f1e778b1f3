// Math utilities and helper functions

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether an angle is a whole number of turns
pub const ANGLE_EPSILON: f64 = 1e-9;

/// Plain `{x, y}` pair used when exporting vectors as JSON objects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Rotate `point` counter-clockwise by `angle` radians around `pivot`
pub fn rotate_about(point: DVec2, pivot: DVec2, angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    let local = point - pivot;
    pivot + DVec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos)
}

/// Check whether an angle in degrees leaves a shape axis-aligned (0, 360, -720, ...)
pub fn is_whole_turn(degrees: f64) -> bool {
    let rem = degrees.rem_euclid(360.0);
    rem < ANGLE_EPSILON || 360.0 - rem < ANGLE_EPSILON
}

/// Unit vector pointing along `degrees` (0 = +x, counter-clockwise positive)
pub fn direction_from_degrees(degrees: f64) -> DVec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    DVec2::new(cos, sin)
}

/// Check that every component of a vector is finite
pub fn is_finite_vec(v: DVec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

/// Project `points` onto `axis`, returning the (min, max) interval
pub fn project(points: &[DVec2], axis: DVec2) -> (f64, f64) {
    points
        .iter()
        .map(|p| p.dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), d| {
            (min.min(d), max.max(d))
        })
}

/// Inclusive interval overlap: touching endpoints count as overlapping
pub fn intervals_overlap(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

/// Relative slack for comparing projections of rotated geometry
pub const PROJECTION_EPSILON: f64 = 1e-9;

/// Inclusive interval overlap that tolerates rounding in the endpoints
///
/// The slack scales with the largest endpoint magnitude, so exactly touching
/// intervals stay touching after a few ULPs of drift.
pub fn intervals_overlap_approx(a: (f64, f64), b: (f64, f64)) -> bool {
    let scale = a.0.abs().max(a.1.abs()).max(b.0.abs()).max(b.1.abs()).max(1.0);
    let eps = PROJECTION_EPSILON * scale;
    a.0 <= b.1 + eps && b.0 <= a.1 + eps
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rotate_quarter_turn() {
        let p = rotate_about(DVec2::new(1.0, 0.0), DVec2::ZERO, std::f64::consts::FRAC_PI_2);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_about_pivot() {
        let p = rotate_about(
            DVec2::new(2.0, 1.0),
            DVec2::new(1.0, 1.0),
            std::f64::consts::PI,
        );
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_whole_turns() {
        assert!(is_whole_turn(0.0));
        assert!(is_whole_turn(360.0));
        assert!(is_whole_turn(-720.0));
        assert!(!is_whole_turn(90.0));
        assert!(!is_whole_turn(45.0));
    }

    #[test]
    fn test_direction_from_degrees() {
        let right = direction_from_degrees(0.0);
        assert_abs_diff_eq!(right.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(right.y, 0.0, epsilon = 1e-12);

        let up = direction_from_degrees(90.0);
        assert_abs_diff_eq!(up.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(up.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_project_and_overlap() {
        let points = [DVec2::new(0.0, 0.0), DVec2::new(3.0, 1.0), DVec2::new(-1.0, 2.0)];
        assert_eq!(project(&points, DVec2::X), (-1.0, 3.0));
        assert!(intervals_overlap((0.0, 1.0), (1.0, 2.0)));
        assert!(!intervals_overlap((0.0, 1.0), (1.5, 2.0)));
    }

    #[test]
    fn test_intervals_overlap_approx() {
        // Drifted by one ULP, still touching
        let drifted = 100.0_f64 + f64::EPSILON * 100.0;
        assert!(!intervals_overlap((0.0, 100.0), (drifted, 200.0)));
        assert!(intervals_overlap_approx((0.0, 100.0), (drifted, 200.0)));
        assert!(intervals_overlap_approx((drifted, 200.0), (0.0, 100.0)));

        assert!(!intervals_overlap_approx((0.0, 100.0), (100.001, 200.0)));
        assert!(!intervals_overlap_approx((0.0, 0.5), (0.5001, 1.0)));
    }
}
