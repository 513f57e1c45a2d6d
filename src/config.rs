//! Game configuration and mode selection
//!
//! Defaults reproduce the classic board. A JSON file may override any field.

use std::path::Path;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::DuetError;
use crate::sim::obstacle::{MIN_CENTER_WIDTH, MIN_SIDE_FRACTION, PATTERN_CLEARANCE};

/// How the balls are steered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Player input from the frontend
    #[default]
    Manual,
    /// Built-in heuristic controller
    Controller,
    /// Learned policy (not implemented, rejected at construction)
    Learned,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Manual => "man",
            Mode::Controller => "contr",
            Mode::Learned => "ai",
        }
    }
}

impl FromStr for Mode {
    type Err = DuetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "man" | "manual" => Ok(Mode::Manual),
            "contr" | "controller" => Ok(Mode::Controller),
            "ai" | "learned" => Ok(Mode::Learned),
            _ => Err(DuetError::UnknownMode(s.to_string())),
        }
    }
}

/// Board geometry, ball motion and obstacle cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: f32,
    pub board_height: f32,
    /// Distance from either ball to the orbit center
    pub orbit_radius: f32,
    /// Distance from the orbit center to the bottom edge
    pub orbit_bottom_offset: f32,
    pub ball_radius: f32,
    /// Radians per tick while steering
    pub spin_step: f32,
    /// Pixels per tick
    pub obstacle_speed: f32,
    pub obstacle_height: f32,
    /// Ticks between obstacle spawns
    pub spawn_interval: u32,
    /// Spawn one set as soon as the session starts
    pub opening_set: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            orbit_radius: CIRCLE_RADIUS,
            orbit_bottom_offset: DIST_TO_BOTTOM,
            ball_radius: BALL_RADIUS,
            spin_step: SPIN_STEP,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_height: OBSTACLE_HEIGHT,
            spawn_interval: NEW_OBS_INTERVAL,
            opening_set: true,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, DuetError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self, DuetError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Center of the circle both balls orbit
    pub fn orbit_center(&self) -> Vec2 {
        Vec2::new(
            self.board_width / 2.0,
            self.board_height - self.orbit_bottom_offset,
        )
    }

    /// Horizontal extent any part of a ball can reach: (left, right)
    pub fn reachable_band(&self) -> (f32, f32) {
        let cx = self.orbit_center().x;
        let reach = self.orbit_radius + self.ball_radius;
        (cx - reach, cx + reach)
    }

    /// Reject geometry the simulation cannot run on
    pub fn validate(&self) -> Result<(), DuetError> {
        let positive = [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("orbit_radius", self.orbit_radius),
            ("ball_radius", self.ball_radius),
            ("spin_step", self.spin_step),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_height", self.obstacle_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(DuetError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.spawn_interval == 0 {
            return Err(DuetError::InvalidConfig(
                "spawn_interval must be at least 1 tick".to_string(),
            ));
        }
        if self.ball_radius >= self.orbit_radius {
            return Err(DuetError::InvalidConfig(format!(
                "ball_radius {} must be smaller than orbit_radius {}",
                self.ball_radius, self.orbit_radius
            )));
        }

        let reach = self.orbit_radius + self.ball_radius;
        let center = self.orbit_center();
        let fits_horizontally = center.x - reach >= 0.0 && center.x + reach <= self.board_width;
        let fits_vertically = center.y - reach >= 0.0 && center.y + reach <= self.board_height;
        if !(fits_horizontally && fits_vertically) {
            return Err(DuetError::InvalidConfig(
                "orbit does not fit on the board".to_string(),
            ));
        }

        // Every obstacle pattern must leave a pose the balls can hold through it
        let band = 2.0 * reach;
        let widest_side = self.orbit_radius - PATTERN_CLEARANCE;
        if widest_side < band * MIN_SIDE_FRACTION {
            return Err(DuetError::InvalidConfig(format!(
                "orbit_radius {} too small for side blocks of at least {:.1} px",
                self.orbit_radius,
                band * MIN_SIDE_FRACTION
            )));
        }
        let widest_center = 2.0 * (self.orbit_radius - self.ball_radius - PATTERN_CLEARANCE);
        if widest_center < MIN_CENTER_WIDTH {
            return Err(DuetError::InvalidConfig(format!(
                "orbit_radius {} too small for center blocks of at least {} px",
                self.orbit_radius, MIN_CENTER_WIDTH
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("man".parse::<Mode>().unwrap(), Mode::Manual);
        assert_eq!("Controller".parse::<Mode>().unwrap(), Mode::Controller);
        assert_eq!("ai".parse::<Mode>().unwrap(), Mode::Learned);
        assert!(matches!(
            "auto".parse::<Mode>(),
            Err(DuetError::UnknownMode(s)) if s == "auto"
        ));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.orbit_center(), Vec2::new(270.0, 845.0));
        assert_eq!(config.reachable_band(), (158.0, 382.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "obstacle_speed": 5.0 }"#).unwrap();
        assert_eq!(config.obstacle_speed, 5.0);
        assert_eq!(config.spawn_interval, NEW_OBS_INTERVAL);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "spawn_interval": 0 }"#),
            Err(DuetError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "orbit_radius": 400.0 }"#),
            Err(DuetError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "ball_radius": -1.0 }"#),
            Err(DuetError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(DuetError::Json(_))
        ));
    }

    #[test]
    fn test_orbit_too_small_for_fair_patterns() {
        // A 40 px center block would cover both balls held level
        let cramped = GameConfig {
            orbit_radius: 30.0,
            ..GameConfig::default()
        };
        assert!(matches!(cramped.validate(), Err(DuetError::InvalidConfig(_))));

        // Side blocks fit, center blocks cannot
        let narrow = GameConfig {
            orbit_radius: 25.0,
            ball_radius: 2.0,
            ..GameConfig::default()
        };
        assert!(matches!(narrow.validate(), Err(DuetError::InvalidConfig(m)) if m.contains("center")));

        let small_orbit = GameConfig {
            orbit_radius: 50.0,
            ..GameConfig::default()
        };
        small_orbit.validate().unwrap();
    }
}
