//! Scrolling obstacles and obstacle-set generation
//!
//! Every set is built from one of four patterns. Each pattern leaves an orbit
//! pose (an angle held still) at which both balls slip past every block of
//! the set, so a set can always be survived.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;

/// Number of discrete lane offsets for [`ObstaclePattern::Lanes`]
pub const LANE_SLOTS: u32 = 5;
/// Free space left on each side of a ball in a safe pose
pub const PATTERN_CLEARANCE: f32 = 8.0;
/// Narrowest block a `Center` pattern produces
pub const MIN_CENTER_WIDTH: f32 = 40.0;
/// Narrowest side block, as a fraction of the reachable band
pub const MIN_SIDE_FRACTION: f32 = 0.3;

/// A single rectangular hazard scrolling down the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    rect: Rect,
    /// Pixels per tick
    speed: f32,
}

impl Obstacle {
    pub fn new(rect: Rect, speed: f32) -> Self {
        Self { rect, speed }
    }

    /// Scroll one tick down
    #[inline]
    pub fn advance(&mut self) {
        self.rect.y += self.speed;
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.rect
    }

    /// Past the bottom edge by at least its own height
    pub fn is_out_of_frame(&self, board_height: f32) -> bool {
        self.rect.y > board_height + self.rect.height
    }
}

/// Layout policy a set was generated from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstaclePattern {
    /// Block hugging the left of the band; pass with the balls vertical
    Left { width: f32 },
    /// Block hugging the right of the band; pass with the balls vertical
    Right { width: f32 },
    /// Block in the middle; pass with the balls horizontal
    Center { width: f32 },
    /// Band filled except two mirrored gaps at `slot` of `LANE_SLOTS` offsets
    Lanes { slot: u32 },
}

/// Obstacles spawned together; scored and removed as one unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSet {
    pub id: u32,
    pub pattern: ObstaclePattern,
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn new(id: u32, pattern: ObstaclePattern, obstacles: Vec<Obstacle>) -> Self {
        Self {
            id,
            pattern,
            obstacles,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn advance(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.advance();
        }
    }

    /// Every obstacle has left the board
    pub fn is_out_of_frame(&self, board_height: f32) -> bool {
        self.obstacles
            .iter()
            .all(|o| o.is_out_of_frame(board_height))
    }
}

impl<'a> IntoIterator for &'a ObstacleSet {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.obstacles.iter()
    }
}

/// Builds obstacle sets for one board geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleGenerator {
    center_x: f32,
    orbit_radius: f32,
    ball_radius: f32,
    band_left: f32,
    band_right: f32,
    height: f32,
    speed: f32,
}

impl ObstacleGenerator {
    pub fn new(config: &GameConfig) -> Self {
        let (band_left, band_right) = config.reachable_band();
        Self {
            center_x: config.orbit_center().x,
            orbit_radius: config.orbit_radius,
            ball_radius: config.ball_radius,
            band_left,
            band_right,
            height: config.obstacle_height,
            speed: config.obstacle_speed,
        }
    }

    /// Width of a lane gap: one ball plus clearance on both sides
    pub fn lane_gap(&self) -> f32 {
        2.0 * (self.ball_radius + PATTERN_CLEARANCE)
    }

    /// Horizontal offset from the orbit center of a lane slot
    pub fn lane_offset(&self, slot: u32) -> f32 {
        slot as f32 * self.orbit_radius / (LANE_SLOTS - 1) as f32
    }

    /// Pick a pattern uniformly, then its size uniformly
    ///
    /// # Panics
    ///
    /// Panics if the size ranges are empty, which
    /// [`GameConfig::validate`] rules out.
    pub fn random_pattern<R: Rng>(&self, rng: &mut R) -> ObstaclePattern {
        let band = self.band_right - self.band_left;
        let side_min = band * MIN_SIDE_FRACTION;
        let side_max = self.center_x - self.ball_radius - PATTERN_CLEARANCE - self.band_left;
        let center_max = 2.0 * (self.orbit_radius - self.ball_radius - PATTERN_CLEARANCE);

        match rng.random_range(0..4u32) {
            0 => ObstaclePattern::Left {
                width: rng.random_range(side_min..=side_max),
            },
            1 => ObstaclePattern::Right {
                width: rng.random_range(side_min..=side_max),
            },
            2 => ObstaclePattern::Center {
                width: rng.random_range(MIN_CENTER_WIDTH..=center_max),
            },
            _ => ObstaclePattern::Lanes {
                slot: rng.random_range(0..LANE_SLOTS),
            },
        }
    }

    /// Lay out a pattern with every block's top at `y`
    pub fn layout(&self, pattern: ObstaclePattern, y: f32) -> Vec<Obstacle> {
        let spans: Vec<(f32, f32)> = match pattern {
            ObstaclePattern::Left { width } => vec![(self.band_left, self.band_left + width)],
            ObstaclePattern::Right { width } => vec![(self.band_right - width, self.band_right)],
            ObstaclePattern::Center { width } => {
                vec![(self.center_x - width / 2.0, self.center_x + width / 2.0)]
            }
            ObstaclePattern::Lanes { slot } => {
                let offset = self.lane_offset(slot);
                let half_gap = self.lane_gap() / 2.0;
                vec![
                    (self.band_left, self.center_x - offset - half_gap),
                    (self.center_x - offset + half_gap, self.center_x + offset - half_gap),
                    (self.center_x + offset + half_gap, self.band_right),
                ]
            }
        };

        spans
            .into_iter()
            .map(|(lo, hi)| (lo.max(self.band_left), hi.min(self.band_right)))
            .filter(|(lo, hi)| hi - lo >= 1.0)
            .map(|(lo, hi)| Obstacle::new(Rect::new(lo, y, hi - lo, self.height), self.speed))
            .collect()
    }

    /// New set just above the top edge of the board
    pub fn generate<R: Rng>(&self, id: u32, rng: &mut R) -> ObstacleSet {
        let pattern = self.random_pattern(rng);
        ObstacleSet::new(id, pattern, self.layout(pattern, -self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::PI;

    /// No obstacle of the set touches the closed horizontal span [lo, hi]
    fn span_is_clear(set: &ObstacleSet, lo: f32, hi: f32) -> bool {
        !set.iter().any(|o| o.bounds().overlaps_span(lo, hi))
    }

    fn generator() -> ObstacleGenerator {
        ObstacleGenerator::new(&GameConfig::default())
    }

    /// Some held angle lets both balls (plus `margin`) pass every block
    fn has_safe_pose(set: &ObstacleSet, margin: f32) -> bool {
        let config = GameConfig::default();
        let cx = config.orbit_center().x;
        let reach = config.ball_radius + margin;
        (0..=1800).any(|i| {
            let theta = i as f32 / 1800.0 * PI;
            let dx = config.orbit_radius * theta.cos();
            [cx + dx, cx - dx]
                .iter()
                .all(|&x| span_is_clear(set, x - reach, x + reach))
        })
    }

    #[test]
    fn test_advance_k_times() {
        let mut obstacle = Obstacle::new(Rect::new(0.0, -30.0, 50.0, 30.0), 4.0);
        let mut last = obstacle.bounds().y;
        for _ in 0..25 {
            obstacle.advance();
            assert!(obstacle.bounds().y > last);
            last = obstacle.bounds().y;
        }
        assert_eq!(obstacle.bounds().y, -30.0 + 25.0 * 4.0);
        assert_eq!(obstacle.bounds().width, 50.0);
    }

    #[test]
    fn test_out_of_frame_boundary() {
        let at_boundary = Obstacle::new(Rect::new(0.0, 990.0, 50.0, 30.0), 4.0);
        assert!(!at_boundary.is_out_of_frame(960.0));
        let past = Obstacle::new(Rect::new(0.0, 990.5, 50.0, 30.0), 4.0);
        assert!(past.is_out_of_frame(960.0));
    }

    #[test]
    fn test_layout_side_blocks() {
        let g = generator();
        let left = g.layout(ObstaclePattern::Left { width: 80.0 }, 0.0);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].bounds(), Rect::new(158.0, 0.0, 80.0, 30.0));

        let right = g.layout(ObstaclePattern::Right { width: 80.0 }, 0.0);
        assert_eq!(right[0].bounds(), Rect::new(302.0, 0.0, 80.0, 30.0));
    }

    #[test]
    fn test_layout_lanes() {
        let g = generator();
        // Slot 0: both gaps merge into one central gap
        let merged = g.layout(ObstaclePattern::Lanes { slot: 0 }, 0.0);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].bounds().right(), 250.0);
        assert_eq!(merged[1].bounds().left(), 290.0);

        // Outermost slot: gaps sit at the horizontal pose, side segments clipped away
        let outer = g.layout(ObstaclePattern::Lanes { slot: LANE_SLOTS - 1 }, 0.0);
        assert_eq!(outer.len(), 1);
        assert_eq!(outer[0].bounds().left(), 190.0);
        assert_eq!(outer[0].bounds().right(), 350.0);

        let middle = g.layout(ObstaclePattern::Lanes { slot: 2 }, 0.0);
        assert_eq!(middle.len(), 3);
    }

    #[test]
    fn test_generate_spawns_above_board() {
        let g = generator();
        let mut rng = Pcg32::seed_from_u64(7);
        let set = g.generate(1, &mut rng);
        assert!(!set.is_empty());
        for obstacle in &set {
            assert_eq!(obstacle.bounds().y, -30.0);
            assert_eq!(obstacle.bounds().height, 30.0);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let g = generator();
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for id in 0..20 {
            let set_a = g.generate(id, &mut a);
            let set_b = g.generate(id, &mut b);
            assert_eq!(set_a.pattern, set_b.pattern);
            assert_eq!(
                set_a.iter().collect::<Vec<_>>(),
                set_b.iter().collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_every_pattern_is_fair() {
        let g = generator();
        let mut rng = Pcg32::seed_from_u64(2024);
        let config = GameConfig::default();
        let (band_left, band_right) = config.reachable_band();

        for id in 0..500 {
            let set = g.generate(id, &mut rng);
            assert!(has_safe_pose(&set, 2.0), "no safe pose for {:?}", set.pattern);

            // Some single-ball lane inside the band is free
            let r = config.ball_radius;
            let free_lane = (0..=224).any(|i| {
                let x = band_left + r + i as f32 * (band_right - band_left - 2.0 * r) / 224.0;
                span_is_clear(&set, x - r, x + r)
            });
            assert!(free_lane, "no free lane for {:?}", set.pattern);
        }
    }

    #[test]
    fn test_all_patterns_appear() {
        let g = generator();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = [false; 4];
        for id in 0..200 {
            let index = match g.generate(id, &mut rng).pattern {
                ObstaclePattern::Left { .. } => 0,
                ObstaclePattern::Right { .. } => 1,
                ObstaclePattern::Center { .. } => 2,
                ObstaclePattern::Lanes { .. } => 3,
            };
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
