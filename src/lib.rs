//! Duet - A twin-orbit dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (balls, obstacles, collisions, controller)
//! - `session`: Tick loop against a frontend, game over and restart protocol
//! - `config`: Board geometry and game mode
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod session;
pub mod sim;

pub use config::{GameConfig, Mode};
pub use error::DuetError;
pub use session::{Frontend, PlaySummary, Session, play};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Board dimensions (pixels)
    pub const BOARD_WIDTH: f32 = 540.0;
    pub const BOARD_HEIGHT: f32 = 960.0;

    /// Distance from either ball to the orbit center
    pub const CIRCLE_RADIUS: f32 = 100.0;
    /// Distance from the orbit center to the bottom of the board
    pub const DIST_TO_BOTTOM: f32 = CIRCLE_RADIUS + 15.0;
    /// Angular step of the balls per tick (radians)
    pub const SPIN_STEP: f32 = 0.0224;

    /// Ball collision radius
    pub const BALL_RADIUS: f32 = 12.0;

    /// Ticks between two obstacle spawns
    pub const NEW_OBS_INTERVAL: u32 = 140;
    /// Downward scroll per tick (pixels)
    pub const OBSTACLE_SPEED: f32 = 4.0;
    pub const OBSTACLE_HEIGHT: f32 = 30.0;

    /// Fixed delay between ticks in the native driver (milliseconds)
    pub const TICK_DELAY_MS: u64 = 10;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
