//! Fixed-step simulation tick
//!
//! Order within a tick: steer, move balls, move obstacles, expire the oldest
//! set (scoring it), spawn on the clock, then test the balls against the
//! oldest set. Balls and obstacles always move before the collision test.

use super::ball::Steering;
use super::collision::ball_rect_collision;
use super::state::{GameEvent, GamePhase, GameState};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Player steering; ignored when the controller is flying
    pub steering: Option<Steering>,
}

/// Advance the game state by one tick and report what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;

    let steering = state.steering_for(input.steering);
    state.balls.steer(steering);

    state.obstacles.advance_all();

    if state.obstacles.oldest_out_of_frame() {
        let cleared = state.obstacles.remove_obstacle_set();
        state.score += 1;
        events.push(GameEvent::SetCleared {
            id: cleared.id,
            score: state.score,
        });
    }

    if state.spawn_clock.advance() {
        let id = state.obstacles.new_obstacle_set().id;
        events.push(GameEvent::SetSpawned { id });
    }

    // Only the oldest set is low enough to reach the balls
    if let Some(oldest) = state.obstacles.oldest_obstacle_set() {
        let hit = oldest.iter().find_map(|obstacle| {
            state.balls.iter().find_map(|(color, ball)| {
                let result = ball_rect_collision(ball.position(), ball.radius, &obstacle.bounds());
                result.hit.then_some((color, result.point))
            })
        });

        if let Some((ball, point)) = hit {
            log::info!(
                "{:?} ball hit obstacle set {} at tick {} (score {})",
                ball,
                oldest.id,
                state.time_ticks,
                state.score
            );
            events.push(GameEvent::Collision {
                ball,
                set_id: oldest.id,
                point,
            });
            state.phase = GamePhase::GameOver;
        }
    }

    events
}
