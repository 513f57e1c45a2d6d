//! Signed distance functions
//!
//! Used for collision margins: the controller ranks steering options by how
//! far the balls stay from the nearest obstacle.

use glam::Vec2;

use super::rect::Rect;

/// Signed distance to an axis-aligned rectangle
/// (negative inside, zero on the boundary)
pub fn sd_rect(p: Vec2, rect: &Rect) -> f32 {
    let half = Vec2::new(rect.width, rect.height) * 0.5;
    let d = (p - rect.center()).abs() - half;
    let outside = d.max(Vec2::ZERO).length();
    let inside = d.x.max(d.y).min(0.0);
    outside + inside
}

/// Gap between a circle's edge and a rectangle (≤ 0 means touching or overlapping)
#[inline]
pub fn circle_rect_clearance(center: Vec2, radius: f32, rect: &Rect) -> f32 {
    sd_rect(center, rect) - radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sd_rect_outside_edge_and_corner() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!((sd_rect(Vec2::new(15.0, 5.0), &r) - 5.0).abs() < 1e-5);
        assert!((sd_rect(Vec2::new(13.0, 14.0), &r) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_sd_rect_boundary_and_inside() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(sd_rect(Vec2::new(10.0, 5.0), &r), 0.0);
        assert!((sd_rect(Vec2::new(5.0, 5.0), &r) + 5.0).abs() < 1e-5);
        assert!((sd_rect(Vec2::new(2.0, 5.0), &r) + 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_clearance() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!((circle_rect_clearance(Vec2::new(20.0, 5.0), 4.0, &r) - 6.0).abs() < 1e-5);
        assert!(circle_rect_clearance(Vec2::new(12.0, 5.0), 4.0, &r) < 0.0);
    }
}
