// Engine facade: the single entry point used by the host application

use glam::DVec2;
use log::info;

use super::config::{BoardConfig, EngineConfig};
use super::physics::{
    collision, debug, motion, CollisionBody, DebugLineBatch, DrawSurface, Entity, EntityRegistry,
    Impact, KinematicProfile, MotionQuery, PhysicsResult,
};
use crate::core::math::Point;

/// Process-wide collision engine state
///
/// Owns the configuration and every registered entity; entities never outlive
/// their engine.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    registry: EntityRegistry,
}

impl Engine {
    /// Create an engine for a `width` x `height` board with a default kinematic profile
    pub fn new(width: f64, height: f64, speed: f64, acceleration: f64) -> PhysicsResult<Self> {
        Self::with_config(EngineConfig {
            board: BoardConfig { width, height },
            kinematics: KinematicProfile {
                speed,
                acceleration,
            },
            ..EngineConfig::default()
        })
    }

    /// Create an engine from a full configuration
    pub fn with_config(config: EngineConfig) -> PhysicsResult<Self> {
        config.validate()?;
        info!(
            "Engine created: board {}x{}, speed {}, acceleration {}",
            config.board.width,
            config.board.height,
            config.kinematics.speed,
            config.kinematics.acceleration
        );
        Ok(Self {
            config,
            registry: EntityRegistry::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn get_dimensions(&self) -> DVec2 {
        DVec2::new(self.config.board.width, self.config.board.height)
    }

    /// Board dimensions as a JSON object `{"x": width, "y": height}`
    pub fn get_dimensions_json(&self) -> PhysicsResult<String> {
        Ok(serde_json::to_string(&Point::from(self.get_dimensions()))?)
    }

    pub fn get_speed(&self) -> f64 {
        self.config.kinematics.speed
    }

    pub fn get_acceleration(&self) -> f64 {
        self.config.kinematics.acceleration
    }

    pub fn kinematic_profile(&self) -> KinematicProfile {
        self.config.kinematics
    }

    /// Replace the default profile used by moving-object queries
    pub fn set_kinematic_profile(&mut self, profile: KinematicProfile) -> PhysicsResult<()> {
        profile.validate()?;
        self.config.kinematics = profile;
        Ok(())
    }

    /// Register a new entity; duplicate names are rejected
    pub fn create_element(
        &mut self,
        name: &str,
        body: CollisionBody,
        x: f64,
        y: f64,
    ) -> PhysicsResult<&Entity> {
        self.registry.create(name, body, x, y)
    }

    /// Register an entity built ahead of time with [`Entity::new`]
    pub fn add_element(&mut self, entity: Entity) -> PhysicsResult<&Entity> {
        self.registry.insert(entity)
    }

    /// Look up an entity; `None` when the name is not registered
    pub fn get_element(&self, name: &str) -> Option<&Entity> {
        self.registry.get(name)
    }

    pub fn get_element_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.registry.get_mut(name)
    }

    pub fn remove_element(&mut self, name: &str) -> bool {
        self.registry.remove(name)
    }

    pub fn update_element_position(&mut self, name: &str, x: f64, y: f64) -> bool {
        self.registry.update_position(name, x, y)
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Static overlap query; unknown names are an error
    pub fn get_collision_between_two_colliders(
        &self,
        name_a: &str,
        name_b: &str,
    ) -> PhysicsResult<bool> {
        collision::test(&self.registry, name_a, name_b)
    }

    /// Moving-object query using the engine's default kinematic profile
    pub fn get_collision_between_collider_and_moving_object(
        &self,
        static_name: &str,
        moving_name: &str,
    ) -> PhysicsResult<bool> {
        self.get_collision_between_collider_and_moving_object_with_profile(
            static_name,
            moving_name,
            self.config.kinematics,
        )
    }

    pub fn get_collision_between_collider_and_moving_object_with_profile(
        &self,
        static_name: &str,
        moving_name: &str,
        profile: KinematicProfile,
    ) -> PhysicsResult<bool> {
        self.get_collision_between_collider_and_moving_object_with_query(
            static_name,
            moving_name,
            &MotionQuery::new(profile),
        )
    }

    pub fn get_collision_between_collider_and_moving_object_with_query(
        &self,
        static_name: &str,
        moving_name: &str,
        query: &MotionQuery,
    ) -> PhysicsResult<bool> {
        Ok(self.time_of_impact(static_name, moving_name, query)?.is_some())
    }

    /// Earliest sampled impact of `moving_name` travelling toward `static_name`
    pub fn time_of_impact(
        &self,
        static_name: &str,
        moving_name: &str,
        query: &MotionQuery,
    ) -> PhysicsResult<Option<Impact>> {
        motion::time_of_impact(
            &self.registry,
            static_name,
            moving_name,
            query,
            &self.config.motion,
            self.get_dimensions(),
        )
    }

    /// Names of every other entity currently overlapping `name`, sorted
    pub fn colliding_with(&self, name: &str) -> PhysicsResult<Vec<String>> {
        self.registry.require(name)?;

        let mut hits = Vec::new();
        for other in self.registry.names() {
            if other != name && collision::test(&self.registry, name, other)? {
                hits.push(other.to_string());
            }
        }
        hits.sort();
        Ok(hits)
    }

    /// A fresh drawing surface sized to the board
    pub fn get_context(&self) -> DebugLineBatch {
        DebugLineBatch::new(self.config.board.width, self.config.board.height)
    }

    /// Draw an entity's collision outline; unknown names are skipped
    pub fn draw_element(&self, name: &str, surface: &mut impl DrawSurface) {
        debug::draw_named(&self.registry, name, surface);
    }

    /// Draw every registered entity
    pub fn draw_all(&self, surface: &mut impl DrawSurface) {
        for entity in self.registry.iter() {
            debug::draw_entity(entity, surface);
        }
    }
}
