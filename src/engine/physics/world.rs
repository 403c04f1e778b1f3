use glam::DVec2;
use log::{debug, warn};
use std::collections::HashMap;

use super::collision::CollisionGroups;
use super::shape::CollisionBody;
use super::{PhysicsError, PhysicsResult};
use crate::core::math::{is_finite_vec, Point};

/// A named game object: a collision body anchored at a world position
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    body: CollisionBody,
    position: DVec2,
    collision_groups: CollisionGroups,
}

impl Entity {
    /// Build a standalone entity, ready to be handed to a registry
    pub fn new(
        name: impl Into<String>,
        body: CollisionBody,
        x: f64,
        y: f64,
    ) -> PhysicsResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(PhysicsError::InvalidName);
        }
        let position = DVec2::new(x, y);
        if !is_finite_vec(position) {
            return Err(PhysicsError::InvalidPosition { x, y });
        }
        Ok(Self {
            name,
            body,
            position,
            collision_groups: CollisionGroups::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &CollisionBody {
        &self.body
    }

    /// World-space anchor
    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn collision_groups(&self) -> &CollisionGroups {
        &self.collision_groups
    }

    pub fn add_collision_group(&mut self, group: impl Into<String>) {
        self.collision_groups.insert(group);
    }

    pub fn remove_collision_group(&mut self, group: &str) {
        self.collision_groups.remove(group);
    }

    pub fn has_collision_group(&self, group: &str) -> bool {
        self.collision_groups.contains(group)
    }

    /// Position as a JSON object `{"x": .., "y": ..}`
    pub fn position_json(&self) -> PhysicsResult<String> {
        Ok(serde_json::to_string(&Point::from(self.position))?)
    }
}

/// Name-keyed registry owning every entity of an engine
///
/// Entities never reference each other, so removal can't leave dangling state.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: HashMap<String, Entity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new entity
    ///
    /// Names are unique: registering an existing name fails with `DuplicateName`
    /// and leaves the first entity untouched.
    pub fn create(
        &mut self,
        name: &str,
        body: CollisionBody,
        x: f64,
        y: f64,
    ) -> PhysicsResult<&Entity> {
        let entity = Entity::new(name, body, x, y)?;
        self.insert(entity)
    }

    /// Register an entity built with [`Entity::new`], keeping its collision groups
    pub fn insert(&mut self, entity: Entity) -> PhysicsResult<&Entity> {
        if self.entities.contains_key(entity.name()) {
            warn!("Rejected duplicate entity '{}'", entity.name());
            return Err(PhysicsError::DuplicateName(entity.name));
        }

        debug!(
            "Created entity '{}' at ({}, {})",
            entity.name, entity.position.x, entity.position.y
        );
        Ok(&*self.entities.entry(entity.name.clone()).or_insert(entity))
    }

    /// Look up an entity; a missing name is a normal outcome
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.get_mut(name)
    }

    /// Look up an entity that a query depends on
    pub fn require(&self, name: &str) -> PhysicsResult<&Entity> {
        self.get(name)
            .ok_or_else(|| PhysicsError::UnknownEntity(name.to_string()))
    }

    /// Remove an entity, returns whether it existed
    pub fn remove(&mut self, name: &str) -> bool {
        let removed = self.entities.remove(name).is_some();
        if removed {
            debug!("Removed entity '{}'", name);
        }
        removed
    }

    /// Move an entity's anchor, returns false if the name is unknown
    /// or the coordinates are not finite
    pub fn update_position(&mut self, name: &str, x: f64, y: f64) -> bool {
        let position = DVec2::new(x, y);
        if !is_finite_vec(position) {
            warn!("Ignored non-finite position ({}, {}) for '{}'", x, y, name);
            return false;
        }
        match self.entities.get_mut(name) {
            Some(entity) => {
                entity.position = position;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Registered names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }
}
