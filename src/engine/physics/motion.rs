//! Kinematic sweep for moving-object collision queries
//!
//! The moving entity departs from its registered position along a fixed
//! direction, covering `speed * t + acceleration * t^2 / 2` after `t` seconds.
//! The sweep samples that trajectory at a fixed timestep up to a bounded
//! number of steps and reports the earliest sampled overlap. This is a
//! discrete approximation; a body fast enough to cross an obstacle between
//! two samples can tunnel through it.

use glam::DVec2;
use log::trace;
use serde::{Deserialize, Serialize};

use super::collision::entities_overlap_at;
use super::shape::CollisionBody;
use super::transform::resolve;
use super::world::EntityRegistry;
use super::{PhysicsError, PhysicsResult};
use crate::core::math::{direction_from_degrees, intervals_overlap, is_finite_vec};

/// Default speed of moving-object queries (units/second)
pub const DEFAULT_SPEED: f64 = 100.0;

/// Default acceleration of moving-object queries (units/second²)
pub const DEFAULT_ACCELERATION: f64 = 10.0;

/// Time between two sweep samples (60 samples per second)
pub const FIXED_TIMESTEP: f64 = 1.0 / 60.0;

/// Number of samples after the starting position (two seconds of motion)
pub const MAX_MOTION_STEPS: u32 = 120;

/// Speed and acceleration used to simulate a moving entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicProfile {
    /// Units per second
    pub speed: f64,
    /// Units per second squared
    pub acceleration: f64,
}

impl KinematicProfile {
    /// Create a validated profile
    pub fn new(speed: f64, acceleration: f64) -> PhysicsResult<Self> {
        let profile = Self {
            speed,
            acceleration,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> PhysicsResult<()> {
        for (name, value) in [("speed", self.speed), ("acceleration", self.acceleration)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PhysicsError::InvalidConfig(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Distance covered after `t` seconds
    pub fn displacement(&self, t: f64) -> f64 {
        self.speed * t + 0.5 * self.acceleration * t * t
    }

    /// A stationary profile never moves the entity
    pub fn is_stationary(&self) -> bool {
        self.speed == 0.0 && self.acceleration == 0.0
    }
}

impl Default for KinematicProfile {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            acceleration: DEFAULT_ACCELERATION,
        }
    }
}

/// Sampling constants of the sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Seconds between two samples
    pub time_step: f64,
    /// Samples taken after the starting position
    pub max_steps: u32,
    /// End the sweep once the moving shape has left the board
    pub stop_at_board_edge: bool,
}

impl MotionConfig {
    pub fn validate(&self) -> PhysicsResult<()> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(PhysicsError::InvalidConfig(format!(
                "time_step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if self.max_steps == 0 {
            return Err(PhysicsError::InvalidConfig(
                "max_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Total simulated time covered by the sweep
    pub fn horizon(&self) -> f64 {
        self.time_step * f64::from(self.max_steps)
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            time_step: FIXED_TIMESTEP,
            max_steps: MAX_MOTION_STEPS,
            stop_at_board_edge: false,
        }
    }
}

/// Parameters of one moving-object query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionQuery {
    pub profile: KinematicProfile,
    /// Explicit travel direction; when absent the moving body's rotation is used
    pub direction: Option<DVec2>,
}

impl MotionQuery {
    pub fn new(profile: KinematicProfile) -> Self {
        Self {
            profile,
            direction: None,
        }
    }

    /// Travel along `direction` instead of the body's orientation
    pub fn with_direction(mut self, direction: DVec2) -> PhysicsResult<Self> {
        if !is_finite_vec(direction) {
            return Err(PhysicsError::InvalidConfig(format!(
                "direction must be finite, got {direction}"
            )));
        }
        self.direction = Some(direction);
        Ok(self)
    }
}

/// First sampled overlap of a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Sample index, 0 being the starting position
    pub step: u32,
    /// Seconds since departure
    pub time: f64,
    /// Hypothetical anchor of the moving entity at that sample
    pub position: DVec2,
}

/// Sweep `moving_name` toward `static_name` and report the earliest overlap
///
/// `board` is the board size, only consulted when `stop_at_board_edge` is set.
pub fn time_of_impact(
    registry: &EntityRegistry,
    static_name: &str,
    moving_name: &str,
    query: &MotionQuery,
    config: &MotionConfig,
    board: DVec2,
) -> PhysicsResult<Option<Impact>> {
    let fixed = registry.require(static_name)?;
    let moving = registry.require(moving_name)?;
    query.profile.validate()?;
    config.validate()?;

    let direction = query
        .direction
        .unwrap_or_else(|| direction_from_degrees(moving.body().rotation_degrees()))
        .normalize_or_zero();
    let stationary = query.profile.is_stationary() || direction == DVec2::ZERO;
    let last_step = if stationary { 0 } else { config.max_steps };

    let start = moving.position();
    let mut been_on_board = false;

    for step in 0..=last_step {
        let time = f64::from(step) * config.time_step;
        let position = start + direction * query.profile.displacement(time);

        if config.stop_at_board_edge {
            let on_board = overlaps_board(moving.body(), position, board);
            if been_on_board && !on_board {
                trace!("'{}' left the board at step {}", moving_name, step);
                break;
            }
            been_on_board |= on_board;
        }

        if entities_overlap_at(fixed, fixed.position(), moving, position) {
            trace!(
                "'{}' hits '{}' at step {} (t = {:.3}s)",
                moving_name,
                static_name,
                step,
                time
            );
            return Ok(Some(Impact {
                step,
                time,
                position,
            }));
        }
    }

    trace!("'{}' never reaches '{}'", moving_name, static_name);
    Ok(None)
}

/// Boolean form of `time_of_impact`; horizon exhaustion is `Ok(false)`
pub fn test_moving(
    registry: &EntityRegistry,
    static_name: &str,
    moving_name: &str,
    query: &MotionQuery,
    config: &MotionConfig,
    board: DVec2,
) -> PhysicsResult<bool> {
    time_of_impact(registry, static_name, moving_name, query, config, board)
        .map(|impact| impact.is_some())
}

fn overlaps_board(body: &CollisionBody, position: DVec2, board: DVec2) -> bool {
    let (min, max) = resolve(body, position).bounds();
    intervals_overlap((min.x, max.x), (0.0, board.x))
        && intervals_overlap((min.y, max.y), (0.0, board.y))
}
