//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (oldest obstacle set first)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod controller;
pub mod manager;
pub mod obstacle;
pub mod rect;
pub mod sdf;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallColor, BallPair, Steering};
pub use collision::{CollisionResult, ball_rect_collision};
pub use controller::Controller;
pub use manager::ObstacleManager;
pub use obstacle::{Obstacle, ObstacleGenerator, ObstaclePattern, ObstacleSet};
pub use rect::Rect;
pub use sdf::{circle_rect_clearance, sd_rect};
pub use state::{GameEvent, GamePhase, GameState, Pilot, Snapshot, SpawnClock};
pub use tick::{TickInput, tick};
