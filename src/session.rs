//! Session loop
//!
//! Drives the simulation one tick at a time against a [`Frontend`], which
//! supplies steering and receives a snapshot after every tick. After a game
//! over the frontend decides whether to quit or start over.

use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, Mode};
use crate::error::DuetError;
use crate::sim::{GameState, Snapshot, Steering, TickInput, tick};

/// Rendering and input collaborator for a session
pub trait Frontend {
    /// Steering for the next tick; `None` holds. Ignored by the controller.
    fn steering(&mut self) -> Option<Steering>;

    /// True once the player asked to close the window
    fn close_requested(&mut self) -> bool {
        false
    }

    /// Show the state after a tick
    fn present(&mut self, snapshot: &Snapshot);

    /// Report the final score; returns true to quit, false to play again
    fn game_over(&mut self, score: u64) -> bool;
}

/// One game driven to completion or until closed
#[derive(Debug)]
pub struct Session {
    state: GameState,
}

impl Session {
    pub fn new(config: GameConfig, mode: Mode, seed: u64) -> Result<Self, DuetError> {
        Ok(Self {
            state: GameState::new(config, mode, seed)?,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Tick until game over or close; true when the frontend wants to quit
    pub fn run<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> bool {
        log::info!(
            "Session started (seed {}, pilot {:?})",
            self.state.seed,
            self.state.pilot()
        );

        loop {
            let input = TickInput {
                steering: frontend.steering(),
            };
            tick(&mut self.state, &input);
            frontend.present(&self.state.snapshot());

            if frontend.close_requested() {
                log::info!(
                    "Close requested at tick {} (score {})",
                    self.state.time_ticks(),
                    self.state.score()
                );
                return true;
            }

            if self.state.is_over() {
                log::info!(
                    "Game over after {} ticks, score {}",
                    self.state.time_ticks(),
                    self.state.score()
                );
                return frontend.game_over(self.state.score());
            }
        }
    }
}

/// Outcome of one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub score: u64,
    pub ticks: u64,
    /// False when the frontend closed mid-game
    pub finished: bool,
}

/// Every game played by [`play`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlaySummary {
    pub mode: Mode,
    pub games: Vec<GameRecord>,
}

impl PlaySummary {
    pub fn best_score(&self) -> Option<u64> {
        self.games.iter().map(|g| g.score).max()
    }

    pub fn total_ticks(&self) -> u64 {
        self.games.iter().map(|g| g.ticks).sum()
    }
}

/// Play games back to back, each with a fresh seed, until the frontend quits
pub fn play<F: Frontend + ?Sized>(
    config: &GameConfig,
    mode: Mode,
    mut seeds: impl FnMut() -> u64,
    frontend: &mut F,
) -> Result<PlaySummary, DuetError> {
    config.validate()?;
    let mut summary = PlaySummary {
        mode,
        games: Vec::new(),
    };

    loop {
        let mut session = Session::new(config.clone(), mode, seeds())?;
        let quit = session.run(frontend);

        let state = session.state();
        summary.games.push(GameRecord {
            seed: state.seed,
            score: state.score(),
            ticks: state.time_ticks(),
            finished: state.is_over(),
        });

        if quit {
            break;
        }
        log::info!("Restarting (game {})", summary.games.len() + 1);
    }

    Ok(summary)
}
