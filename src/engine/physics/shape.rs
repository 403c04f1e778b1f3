use glam::DVec2;

use super::{PhysicsError, PhysicsResult};
use crate::core::math::is_finite_vec;

/// Discriminant used by the host-facing body constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rect,
    Circle,
}

/// Local geometry of a collision primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { width: f64, height: f64 },
    Circle { radius: f64 },
}

impl Shape {
    /// Create a validated rectangle
    pub fn rect(width: f64, height: f64) -> PhysicsResult<Self> {
        let shape = Shape::Rect { width, height };
        shape.validate()?;
        Ok(shape)
    }

    /// Create a validated circle
    pub fn circle(radius: f64) -> PhysicsResult<Self> {
        let shape = Shape::Circle { radius };
        shape.validate()?;
        Ok(shape)
    }

    /// Build a shape from a kind and its bounding box dimensions.
    ///
    /// A circle takes its diameter from the box, so `width` and `height` must match.
    pub fn from_kind(kind: ShapeKind, width: f64, height: f64) -> PhysicsResult<Self> {
        match kind {
            ShapeKind::Rect => Self::rect(width, height),
            ShapeKind::Circle => {
                if width != height {
                    return Err(PhysicsError::InvalidShape(format!(
                        "circle needs equal width and height, got {width}x{height}"
                    )));
                }
                Self::circle(width / 2.0)
            }
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rect { .. } => ShapeKind::Rect,
            Shape::Circle { .. } => ShapeKind::Circle,
        }
    }

    /// Size of the local bounding box
    pub fn size(&self) -> DVec2 {
        match *self {
            Shape::Rect { width, height } => DVec2::new(width, height),
            Shape::Circle { radius } => DVec2::splat(radius * 2.0),
        }
    }

    fn validate(&self) -> PhysicsResult<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(PhysicsError::InvalidShape(format!(
                    "{name} must be positive and finite, got {value}"
                )))
            }
        };

        match *self {
            Shape::Rect { width, height } => {
                positive("width", width)?;
                positive("height", height)
            }
            Shape::Circle { radius } => positive("radius", radius),
        }
    }
}

/// Local-space collision definition attached to an entity
///
/// The shape's bounding box has its top-left corner at `offset` relative to the
/// entity anchor. Rotation is applied about the shape's own center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBody {
    shape: Shape,
    offset: DVec2,
    rotation_degrees: f64,
    mass: f64,
}

impl CollisionBody {
    /// Create an unrotated, static body from a shape kind and box dimensions
    pub fn new(
        kind: ShapeKind,
        width: f64,
        height: f64,
        offset_x: f64,
        offset_y: f64,
    ) -> PhysicsResult<Self> {
        Self::from_shape(Shape::from_kind(kind, width, height)?, offset_x, offset_y)
    }

    /// Create an unrotated, static body from an already built shape
    pub fn from_shape(shape: Shape, offset_x: f64, offset_y: f64) -> PhysicsResult<Self> {
        shape.validate()?;
        let offset = DVec2::new(offset_x, offset_y);
        if !is_finite_vec(offset) {
            return Err(PhysicsError::InvalidBody(format!(
                "offset must be finite, got ({offset_x}, {offset_y})"
            )));
        }
        Ok(Self {
            shape,
            offset,
            rotation_degrees: 0.0,
            mass: 0.0,
        })
    }

    /// Set the orientation in degrees (counter-clockwise positive)
    pub fn with_rotation(mut self, degrees: f64) -> PhysicsResult<Self> {
        if !degrees.is_finite() {
            return Err(PhysicsError::InvalidBody(format!(
                "rotation must be finite, got {degrees}"
            )));
        }
        self.rotation_degrees = degrees;
        Ok(self)
    }

    /// Set the mass (0.0 = static body)
    pub fn with_mass(mut self, mass: f64) -> PhysicsResult<Self> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(PhysicsError::InvalidBody(format!(
                "mass must be non-negative and finite, got {mass}"
            )));
        }
        self.mass = mass;
        Ok(self)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn offset(&self) -> DVec2 {
        self.offset
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Zero-mass bodies never move
    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }

    /// Center of the shape in the entity's local frame
    pub fn local_center(&self) -> DVec2 {
        self.offset + self.shape.size() / 2.0
    }
}
