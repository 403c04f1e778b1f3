// Engine configuration: board size, default kinematics and sweep sampling

use serde::{Deserialize, Serialize};

use super::physics::{KinematicProfile, MotionConfig, PhysicsError, PhysicsResult};

/// Default board width in world units
pub const DEFAULT_BOARD_WIDTH: f64 = 800.0;
/// Default board height in world units
pub const DEFAULT_BOARD_HEIGHT: f64 = 600.0;

/// Dimensions of the play area
///
/// Used for rendering and for the optional board-edge cutoff of moving queries;
/// entities are free to sit outside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: f64,
    pub height: f64,
}

impl BoardConfig {
    pub fn validate(&self) -> PhysicsResult<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PhysicsError::InvalidConfig(format!(
                    "board {name} must be positive and finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
        }
    }
}

/// Complete engine configuration
///
/// Every section falls back to its defaults when missing from JSON input:
///
/// ```json
/// {
///   "board": { "width": 800, "height": 600 },
///   "kinematics": { "speed": 100, "acceleration": 10 },
///   "motion": { "time_step": 0.0166, "max_steps": 120, "stop_at_board_edge": false }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board: BoardConfig,
    pub kinematics: KinematicProfile,
    pub motion: MotionConfig,
}

impl EngineConfig {
    /// Build a configuration from the four host-facing constructor values
    pub fn new(width: f64, height: f64, speed: f64, acceleration: f64) -> PhysicsResult<Self> {
        let config = Self {
            board: BoardConfig { width, height },
            kinematics: KinematicProfile {
                speed,
                acceleration,
            },
            motion: MotionConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> PhysicsResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> PhysicsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> PhysicsResult<()> {
        self.board.validate()?;
        self.kinematics.validate()?;
        self.motion.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.board.width, 800.0);
        assert_eq!(config.board.height, 600.0);
        assert_eq!(config.kinematics.speed, 100.0);
        assert_eq!(config.kinematics.acceleration, 10.0);
        assert_eq!(config.motion.max_steps, 120);
        assert!(!config.motion.stop_at_board_edge);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_validates() {
        assert!(EngineConfig::new(800.0, 600.0, 100.0, 10.0).is_ok());
        assert!(EngineConfig::new(0.0, 600.0, 100.0, 10.0).is_err());
        assert!(EngineConfig::new(800.0, -1.0, 100.0, 10.0).is_err());
        assert!(EngineConfig::new(800.0, 600.0, -100.0, 10.0).is_err());
        assert!(EngineConfig::new(800.0, 600.0, 100.0, -10.0).is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json_str(
            r#"{ "board": { "width": 320, "height": 240 }, "motion": { "max_steps": 30 } }"#,
        )
        .unwrap();

        assert_eq!(config.board.width, 320.0);
        assert_eq!(config.kinematics, KinematicProfile::default());
        assert_eq!(config.motion.max_steps, 30);
        assert_eq!(config.motion.time_step, MotionConfig::default().time_step);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            EngineConfig::from_json_str("not json"),
            Err(PhysicsError::Json(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "kinematics": { "speed": -1, "acceleration": 0 } }"#),
            Err(PhysicsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let config = EngineConfig::new(320.0, 240.0, 300.0, 10.0).unwrap();
        let parsed = EngineConfig::from_json_str(&config.to_json_string().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
