// Engine modules: configuration, facade, collision physics

pub mod config;
pub mod facade;
pub mod physics;

pub use config::{BoardConfig, EngineConfig};
pub use facade::Engine;
