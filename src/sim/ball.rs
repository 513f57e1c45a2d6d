//! The two orbiting balls
//!
//! Both balls ride the same circle half a turn apart. They are only ever
//! steered together through [`BallPair::steer`].

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::ball_rect_collision;
use super::obstacle::Obstacle;
use crate::{polar_to_cartesian, wrap_angle};

/// Steering decision applied to both balls for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Steering {
    /// Decrease the orbit angle
    Left,
    #[default]
    Hold,
    /// Increase the orbit angle
    Right,
}

impl Steering {
    /// Fixed tie-break order used by the controller
    pub const PRIORITY: [Steering; 3] = [Steering::Hold, Steering::Left, Steering::Right];

    /// -1, 0 or +1
    pub fn sign(self) -> i8 {
        match self {
            Steering::Left => -1,
            Steering::Hold => 0,
            Steering::Right => 1,
        }
    }
}

/// Which ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallColor {
    Red,
    Blue,
}

/// One ball on the orbit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center of the orbit circle
    pub center: Vec2,
    /// Distance from the orbit center
    pub orbit_radius: f32,
    /// Current angle, always in [0, 2π)
    theta: f32,
    /// Angle change per spin
    pub spin_step: f32,
    /// Collision radius
    pub radius: f32,
}

impl Ball {
    pub fn new(center: Vec2, orbit_radius: f32, theta: f32, spin_step: f32, radius: f32) -> Self {
        Self {
            center,
            orbit_radius,
            theta: wrap_angle(theta),
            spin_step,
            radius,
        }
    }

    #[inline]
    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn spin_left(&mut self) {
        self.theta = wrap_angle(self.theta - self.spin_step);
    }

    pub fn spin_right(&mut self) {
        self.theta = wrap_angle(self.theta + self.spin_step);
    }

    /// Cartesian position of the ball center
    pub fn position(&self) -> Vec2 {
        self.center + polar_to_cartesian(self.orbit_radius, self.theta)
    }

    /// True if the ball touches or overlaps the obstacle
    pub fn collided_with(&self, obstacle: &Obstacle) -> bool {
        ball_rect_collision(self.position(), self.radius, &obstacle.bounds()).hit
    }
}

/// The red and blue balls, half a turn apart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallPair {
    pub red: Ball,
    pub blue: Ball,
}

impl BallPair {
    /// Red starts at angle 0 (right of center), blue at π (left of center)
    pub fn new(center: Vec2, orbit_radius: f32, spin_step: f32, ball_radius: f32) -> Self {
        Self {
            red: Ball::new(center, orbit_radius, 0.0, spin_step, ball_radius),
            blue: Ball::new(center, orbit_radius, PI, spin_step, ball_radius),
        }
    }

    /// Rotate both balls one step in the same direction
    pub fn steer(&mut self, steering: Steering) {
        match steering {
            Steering::Left => {
                self.blue.spin_left();
                self.red.spin_left();
            }
            Steering::Right => {
                self.blue.spin_right();
                self.red.spin_right();
            }
            Steering::Hold => {}
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BallColor, &Ball)> {
        [(BallColor::Red, &self.red), (BallColor::Blue, &self.blue)].into_iter()
    }

    /// First ball (red before blue) touching the obstacle
    pub fn collision_with(&self, obstacle: &Obstacle) -> Option<BallColor> {
        self.iter()
            .find(|(_, ball)| ball.collided_with(obstacle))
            .map(|(color, _)| color)
    }
}
