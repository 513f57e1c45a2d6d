//! Ordered queue of obstacle sets
//!
//! Sets are kept in spawn order, so the front of the queue is always the set
//! lowest on screen and the only one the balls can reach.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::obstacle::{Obstacle, ObstacleGenerator, ObstacleSet};
use super::rect::Rect;
use crate::config::GameConfig;

/// Oldest-first queue of live obstacle sets
#[derive(Debug, Clone)]
pub struct ObstacleManager {
    sets: VecDeque<ObstacleSet>,
    generator: ObstacleGenerator,
    rng: Pcg32,
    board_height: f32,
    /// Upper bound on live sets for this geometry
    capacity: usize,
    next_id: u32,
}

impl ObstacleManager {
    /// Empty manager whose sets are drawn from `seed`
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        // A set lives from y = -h until y > board_height + h
        let travel = config.board_height + 2.0 * config.obstacle_height;
        let lifetime_ticks = (travel / config.obstacle_speed).floor() as usize + 1;
        let capacity = lifetime_ticks / config.spawn_interval as usize + 2;

        Self {
            sets: VecDeque::with_capacity(capacity),
            generator: ObstacleGenerator::new(config),
            rng: Pcg32::seed_from_u64(seed),
            board_height: config.board_height,
            capacity,
            next_id: 1,
        }
    }

    /// Generate a set above the board and append it as the newest
    pub fn new_obstacle_set(&mut self) -> &ObstacleSet {
        let id = self.next_id;
        self.next_id += 1;
        let set = self.generator.generate(id, &mut self.rng);
        log::debug!("Spawned obstacle set {} ({:?})", id, set.pattern);

        self.sets.push_back(set);
        debug_assert!(
            self.sets.len() <= self.capacity,
            "{} live obstacle sets exceeds capacity {}",
            self.sets.len(),
            self.capacity
        );
        &self.sets[self.sets.len() - 1]
    }

    /// Append a hand-built set
    #[cfg(test)]
    pub(crate) fn push_obstacle_set(&mut self, set: ObstacleSet) {
        self.sets.push_back(set);
    }

    /// The lowest set on screen, if any
    pub fn oldest_obstacle_set(&self) -> Option<&ObstacleSet> {
        self.sets.front()
    }

    /// True when the oldest set has completely left the board
    pub fn oldest_out_of_frame(&self) -> bool {
        self.sets
            .front()
            .is_some_and(|set| set.is_out_of_frame(self.board_height))
    }

    /// Pop the oldest set
    ///
    /// # Panics
    ///
    /// Panics if the manager is empty. Callers check
    /// [`oldest_out_of_frame`](Self::oldest_out_of_frame) first.
    pub fn remove_obstacle_set(&mut self) -> ObstacleSet {
        match self.sets.pop_front() {
            Some(set) => {
                log::debug!("Removed obstacle set {}", set.id);
                set
            }
            None => panic!("remove_obstacle_set called on an empty obstacle manager"),
        }
    }

    /// Scroll every obstacle one tick
    pub fn advance_all(&mut self) {
        for set in &mut self.sets {
            set.advance();
        }
    }

    /// Every obstacle rectangle, oldest set first
    pub fn obstacle_rects(&self) -> Vec<Rect> {
        self.obstacles().map(Obstacle::bounds).collect()
    }

    /// Every obstacle, oldest set first
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.sets.iter().flat_map(ObstacleSet::iter)
    }

    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, ObstacleSet> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<'a> IntoIterator for &'a ObstacleManager {
    type Item = &'a ObstacleSet;
    type IntoIter = std::collections::vec_deque::Iter<'a, ObstacleSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ObstacleManager {
        ObstacleManager::new(&GameConfig::default(), 1234)
    }

    /// Ticks for a freshly spawned set to sit exactly on the out-of-frame boundary
    fn ticks_to_boundary(config: &GameConfig) -> u32 {
        ((config.board_height + 2.0 * config.obstacle_height) / config.obstacle_speed) as u32
    }

    #[test]
    fn test_empty_manager() {
        let m = manager();
        assert!(m.is_empty());
        assert!(m.oldest_obstacle_set().is_none());
        assert!(!m.oldest_out_of_frame());
        assert!(m.obstacle_rects().is_empty());
    }

    #[test]
    #[should_panic(expected = "empty obstacle manager")]
    fn test_remove_from_empty_panics() {
        manager().remove_obstacle_set();
    }

    #[test]
    fn test_sets_are_oldest_first() {
        let mut m = manager();
        let first = m.new_obstacle_set().id;
        m.advance_all();
        let second = m.new_obstacle_set().id;

        let ids: Vec<u32> = m.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(m.oldest_obstacle_set().map(|s| s.id), Some(first));

        // Flattened view follows the same order: older set is lower on screen
        let rects = m.obstacle_rects();
        let first_len = m.oldest_obstacle_set().map_or(0, ObstacleSet::len);
        assert!(rects[..first_len].iter().all(|r| r.y == -26.0));
        assert!(rects[first_len..].iter().all(|r| r.y == -30.0));
        assert_eq!(rects.len(), (&m).into_iter().map(ObstacleSet::len).sum::<usize>());
    }

    #[test]
    fn test_out_of_frame_at_exact_boundary() {
        let config = GameConfig::default();
        let mut m = manager();
        m.new_obstacle_set();

        // 1020 px of travel at 4 px/tick lands exactly on y == H + h
        for _ in 0..ticks_to_boundary(&config) {
            m.advance_all();
        }
        let y = m.obstacle_rects()[0].y;
        assert_eq!(y, config.board_height + config.obstacle_height);
        assert!(!m.oldest_out_of_frame());

        m.advance_all();
        assert!(m.oldest_out_of_frame());
        let removed = m.remove_obstacle_set();
        assert_eq!(removed.id, 1);
        assert!(m.is_empty());
    }

    #[test]
    fn test_only_oldest_set_is_checked() {
        let config = GameConfig::default();
        let mut m = manager();
        m.new_obstacle_set();
        for _ in 0..ticks_to_boundary(&config) + 1 {
            m.advance_all();
        }
        m.new_obstacle_set();
        assert!(m.oldest_out_of_frame());
        m.remove_obstacle_set();
        // The newer set is still at the top
        assert!(!m.oldest_out_of_frame());
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_capacity_covers_one_lifetime() {
        let m = manager();
        // 256 ticks of life / 140 tick interval + margin
        assert_eq!(m.capacity(), 3);
    }

    #[test]
    fn test_same_seed_same_sets() {
        let mut a = manager();
        let mut b = manager();
        for _ in 0..10 {
            a.new_obstacle_set();
            b.new_obstacle_set();
            assert_eq!(a.obstacle_rects(), b.obstacle_rects());
            a.remove_obstacle_set();
            b.remove_obstacle_set();
        }
    }
}
