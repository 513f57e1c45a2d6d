//! Game state and core simulation types
//!
//! Everything a tick reads or writes is owned by [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::{BallColor, BallPair, Steering};
use super::controller::Controller;
use super::manager::ObstacleManager;
use super::rect::Rect;
use crate::config::{GameConfig, Mode};
use crate::error::DuetError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// A ball hit an obstacle
    GameOver,
}

/// Who steers, fixed for the whole game
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pilot {
    /// Steering comes from [`TickInput`](super::tick::TickInput)
    Manual,
    /// Steering comes from the heuristic controller
    Autonomous(Controller),
}

impl Pilot {
    /// Resolve a mode, rejecting modes without an implementation
    pub fn for_mode(mode: Mode, config: &GameConfig) -> Result<Self, DuetError> {
        match mode {
            Mode::Manual => Ok(Pilot::Manual),
            Mode::Controller => Ok(Pilot::Autonomous(Controller::from_config(config))),
            Mode::Learned => Err(DuetError::UnsupportedMode(mode.as_str())),
        }
    }
}

/// Fires once every `interval` ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnClock {
    interval: u32,
    count: u32,
}

impl SpawnClock {
    pub fn new(interval: u32) -> Self {
        Self { interval, count: 0 }
    }

    /// Count one tick; true on every `interval`-th call
    pub fn advance(&mut self) -> bool {
        self.count = (self.count + 1) % self.interval;
        self.count == 0
    }

    /// Ticks counted since the last firing
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new obstacle set entered at the top
    SetSpawned { id: u32 },
    /// The oldest set left the board and scored
    SetCleared { id: u32, score: u64 },
    /// A ball touched an obstacle of the oldest set
    Collision { ball: BallColor, set_id: u32, point: Vec2 },
}

/// Read-only view handed to the renderer each tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub score: u64,
    pub phase: GamePhase,
    pub red: Vec2,
    pub blue: Vec2,
    pub orbit_center: Vec2,
    pub orbit_radius: f32,
    /// Oldest set first
    pub obstacles: Vec<Rect>,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) pilot: Pilot,
    pub(crate) balls: BallPair,
    pub(crate) obstacles: ObstacleManager,
    pub(crate) spawn_clock: SpawnClock,
    pub(crate) score: u64,
    pub(crate) time_ticks: u64,
    pub(crate) phase: GamePhase,
}

impl GameState {
    /// Validate the configuration and mode, then place the balls
    pub fn new(config: GameConfig, mode: Mode, seed: u64) -> Result<Self, DuetError> {
        config.validate()?;
        let pilot = Pilot::for_mode(mode, &config)?;

        let balls = BallPair::new(
            config.orbit_center(),
            config.orbit_radius,
            config.spin_step,
            config.ball_radius,
        );
        let mut obstacles = ObstacleManager::new(&config, seed);
        if config.opening_set {
            obstacles.new_obstacle_set();
        }

        Ok(Self {
            spawn_clock: SpawnClock::new(config.spawn_interval),
            config,
            seed,
            pilot,
            balls,
            obstacles,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn pilot(&self) -> Pilot {
        self.pilot
    }

    pub fn balls(&self) -> &BallPair {
        &self.balls
    }

    /// Obstacle sets for rendering; mutation stays inside the tick
    pub fn obstacles(&self) -> &ObstacleManager {
        &self.obstacles
    }

    pub fn spawn_clock(&self) -> SpawnClock {
        self.spawn_clock
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Steering for this tick: player input or the controller's decision
    pub fn steering_for(&self, requested: Option<Steering>) -> Steering {
        match self.pilot {
            Pilot::Manual => requested.unwrap_or_default(),
            Pilot::Autonomous(controller) => controller.decide(
                &self.obstacles.obstacle_rects(),
                self.balls.red.position(),
                self.balls.blue.position(),
            ),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ticks: self.time_ticks,
            score: self.score,
            phase: self.phase,
            red: self.balls.red.position(),
            blue: self.balls.blue.position(),
            orbit_center: self.config.orbit_center(),
            orbit_radius: self.config.orbit_radius,
            obstacles: self.obstacles.obstacle_rects(),
        }
    }
}
