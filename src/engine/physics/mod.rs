// Collision geometry and query engine
//
// ## Architecture
//
// - `shape`: local collision primitives and validated collision bodies
// - `transform`: resolution of bodies into world-space shapes
// - `collision`: static overlap tests between world-space shapes
// - `motion`: kinematic sweep for moving-object queries
// - `world`: name-keyed entity registry
// - `debug`: debug-draw surface contract and a line-list batch

pub mod collision;
pub mod debug;
pub mod motion;
pub mod shape;
pub mod transform;
pub mod world;

pub use collision::{shapes_overlap, CollisionGroups};
pub use debug::{DebugColor, DebugLineBatch, DebugVertex, DrawSurface, TextLabel};
pub use motion::{Impact, KinematicProfile, MotionConfig, MotionQuery};
pub use shape::{CollisionBody, Shape, ShapeKind};
pub use transform::{resolve, WorldShape};
pub use world::{Entity, EntityRegistry};

/// Errors reported by the collision engine
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("Entity already exists: {0}")]
    DuplicateName(String),

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Entity name must not be empty")]
    InvalidName,

    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Invalid collision body: {0}")]
    InvalidBody(String),

    #[error("Invalid position: ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type used throughout the physics module
pub type PhysicsResult<T> = Result<T, PhysicsError>;
