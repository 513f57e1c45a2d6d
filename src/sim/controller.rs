//! Heuristic autopilot
//!
//! Pure function of the obstacle rectangles and the two ball positions; no
//! state survives between calls.
//!
//! Policy:
//! 1. Threat row: obstacles not yet below the lower ball, narrowed to those
//!    level with the lowest of them (the next row to arrive).
//! 2. Plan: walk orbit poses one spin step at a time, nearest first (left
//!    before right at equal distance), up to a quarter turn. The first pose
//!    whose two ball footprints miss the whole row horizontally decides the
//!    direction. A quarter turn covers every pose because the pair looks the
//!    same after half a turn.
//! 3. Safety: every action is projected one tick ahead, balls spun and
//!    obstacles scrolled. The plan is used only if its projection touches
//!    nothing; otherwise the action with the largest clearance wins, ties
//!    going to Hold, then Left, then Right.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Steering;
use super::rect::Rect;
use super::sdf::circle_rect_clearance;
use crate::config::GameConfig;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Extra room required on both sides of a ball for a pose to count as clear
pub const POSE_MARGIN: f32 = 2.0;

/// Orbit recovered from two diametrically opposite ball positions
#[derive(Debug, Clone, Copy)]
struct Orbit {
    center: Vec2,
    radius: f32,
    /// Angle of the red ball
    theta: f32,
}

impl Orbit {
    fn from_positions(red: Vec2, blue: Vec2) -> Self {
        let center = (red + blue) * 0.5;
        let (radius, theta) = cartesian_to_polar(red - center);
        Self {
            center,
            radius,
            theta,
        }
    }

    /// Red and blue positions with red at `theta`
    fn positions(&self, theta: f32) -> [Vec2; 2] {
        let offset = polar_to_cartesian(self.radius, theta);
        [self.center + offset, self.center - offset]
    }
}

/// Steering autopilot for autonomous mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    spin_step: f32,
    ball_radius: f32,
    /// Obstacle scroll per tick, applied before the next collision test
    obstacle_speed: f32,
}

impl Controller {
    pub fn new(spin_step: f32, ball_radius: f32, obstacle_speed: f32) -> Self {
        Self {
            spin_step,
            ball_radius,
            obstacle_speed,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.spin_step, config.ball_radius, config.obstacle_speed)
    }

    /// Steering for the next tick
    pub fn decide(&self, obstacles: &[Rect], red: Vec2, blue: Vec2) -> Steering {
        if obstacles.is_empty() {
            return Steering::Hold;
        }

        let threats = self.threat_row(obstacles, red, blue);
        if threats.is_empty() {
            return Steering::Hold;
        }

        let orbit = Orbit::from_positions(red, blue);
        let planned = self.plan(&threats, &orbit);

        let options = Steering::PRIORITY.map(|s| (s, self.clearance_after(s, obstacles, &orbit)));

        if let Some(plan) = planned {
            let safe = options
                .iter()
                .any(|&(steering, clearance)| steering == plan && clearance > 0.0);
            if safe {
                log::trace!("controller: {:?} toward clear pose", plan);
                return plan;
            }
        }

        // Largest clearance; strict comparison keeps the earlier priority on ties
        let mut best = options[0];
        for &option in &options[1..] {
            if option.1 > best.1 {
                best = option;
            }
        }
        log::trace!(
            "controller: {:?} by clearance {:.2} (plan {:?})",
            best.0,
            best.1,
            planned
        );
        best.0
    }

    /// Next row of obstacles that can still reach a ball
    fn threat_row(&self, obstacles: &[Rect], red: Vec2, blue: Vec2) -> Vec<Rect> {
        let lowest_reach = red.y.max(blue.y) + self.ball_radius;
        let pending: Vec<Rect> = obstacles
            .iter()
            .filter(|r| r.top() <= lowest_reach)
            .copied()
            .collect();

        let Some(row_top) = pending
            .iter()
            .max_by(|a, b| a.bottom().total_cmp(&b.bottom()))
            .map(Rect::top)
        else {
            return Vec::new();
        };

        pending
            .into_iter()
            .filter(|r| r.bottom() >= row_top)
            .collect()
    }

    /// Direction of the nearest reachable pose that clears the row
    fn plan(&self, threats: &[Rect], orbit: &Orbit) -> Option<Steering> {
        let max_steps = (FRAC_PI_2 / self.spin_step).ceil() as i32;
        std::iter::once(0)
            .chain((1..=max_steps).flat_map(|k| [-k, k]))
            .find(|&k| self.pose_is_clear(threats, orbit, orbit.theta + k as f32 * self.spin_step))
            .map(|k| match k.signum() {
                -1 => Steering::Left,
                0 => Steering::Hold,
                _ => Steering::Right,
            })
    }

    /// Both balls' horizontal footprints miss every threat at this pose
    fn pose_is_clear(&self, threats: &[Rect], orbit: &Orbit, theta: f32) -> bool {
        let reach = self.ball_radius + POSE_MARGIN;
        orbit.positions(theta).iter().all(|p| {
            threats
                .iter()
                .all(|r| !r.overlaps_span(p.x - reach, p.x + reach))
        })
    }

    /// Smallest gap between either ball and any obstacle on the next tick
    fn clearance_after(&self, steering: Steering, obstacles: &[Rect], orbit: &Orbit) -> f32 {
        let theta = orbit.theta + steering.sign() as f32 * self.spin_step;
        let dy = self.obstacle_speed;
        orbit
            .positions(theta)
            .iter()
            .flat_map(|&p| {
                obstacles.iter().map(move |r| {
                    let scrolled = Rect::new(r.x, r.y + dy, r.width, r.height);
                    circle_rect_clearance(p, self.ball_radius, &scrolled)
                })
            })
            .fold(f32::MAX, f32::min)
    }
}
