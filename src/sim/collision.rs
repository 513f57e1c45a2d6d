//! Collision detection between a ball and a rectangular obstacle
//!
//! A circle can clip a rectangle's corner without its center entering the
//! radius-expanded box, so the test measures the distance to the closest
//! point of the rectangle instead of comparing bounding boxes.
//! Touching counts as a hit.

use glam::Vec2;

use super::rect::Rect;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Point of the rectangle nearest the ball center
    pub point: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
        }
    }
}

/// Check collision between a ball and a rectangle
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> CollisionResult {
    let closest = rect.closest_point(ball_pos);
    if (ball_pos - closest).length_squared() > ball_radius * ball_radius {
        return CollisionResult::miss();
    }
    CollisionResult {
        hit: true,
        point: closest,
    }
}
