//! 2D collision detection and named entity registry.
//!
//! The host creates collision bodies, registers them as named entities on an
//! [`Engine`], then asks whether pairs of entities overlap, either where they
//! stand or while one of them travels under a kinematic profile. Geometry can
//! be drawn onto any [`DrawSurface`] for debugging.

pub mod core;
pub mod engine;

pub use engine::physics::{
    CollisionBody, DebugLineBatch, DrawSurface, Entity, Impact, KinematicProfile, MotionConfig,
    MotionQuery, PhysicsError, PhysicsResult, Shape, ShapeKind, WorldShape,
};
pub use engine::{BoardConfig, Engine, EngineConfig};
